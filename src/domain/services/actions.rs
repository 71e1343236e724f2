#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::TransportBox;
use crate::domain::models::UploadFile;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /sessions (/sl) - Lists the sessions open on the agent server.
- /session (/s) [NAME] - Activates the named server session and restores its chat history.
- /rmsession (/rms) [NAME] - Removes the named server session.
- /upload (/u) [PATH...] - Uploads documents for the agent's retrieval database.
- /quit /exit (/q) - Exit Confab.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Submit your message.
- Up arrow / Down arrow - Scroll up / down.
- CTRL+U / CTRL+D - Page up / page down.
- CTRL+P - Toggle the settings sidebar.
- CTRL+Y - Cycle the color scheme.
- CTRL+T - Toggle diagnostic traces under agent replies.
- CTRL+C - Exit Confab.
        "#;

    return text.trim().to_string();
}

async fn session_list(transport: &TransportBox, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    match transport.list_sessions().await {
        Ok(sessions) => {
            if sessions.is_empty() {
                tx.send(Event::AgentNotice(
                    "There are no open sessions on the agent server.".to_string(),
                ))?;
                return Ok(());
            }

            let res = sessions
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let n = idx + 1;
                    return format!("- ({n}) {name}");
                })
                .collect::<Vec<String>>();

            tx.send(Event::AgentNotice(res.join("\n")))?;
        }
        Err(err) => {
            tx.send(Event::AgentError(format!("Listing sessions failed: {err}")))?;
        }
    }

    return Ok(());
}

async fn session_change(
    transport: &TransportBox,
    tx: &mpsc::UnboundedSender<Event>,
    name: &str,
) -> Result<()> {
    match transport.change_session(name).await {
        Ok(entries) => {
            tx.send(Event::SessionRestored(name.to_string(), entries))?;
        }
        Err(err) => {
            tx.send(Event::AgentError(format!(
                "Activating session {name} failed: {err}"
            )))?;
        }
    }

    return Ok(());
}

async fn session_remove(
    transport: &TransportBox,
    tx: &mpsc::UnboundedSender<Event>,
    name: &str,
) -> Result<()> {
    match transport.remove_session(name).await {
        Ok(message) => {
            tx.send(Event::AgentNotice(message))?;
        }
        Err(err) => {
            tx.send(Event::AgentError(format!(
                "Removing session {name} failed: {err}"
            )))?;
        }
    }

    return Ok(());
}

async fn document_upload(
    transport: &TransportBox,
    tx: &mpsc::UnboundedSender<Event>,
    paths: Vec<String>,
) -> Result<()> {
    let mut files: Vec<UploadFile> = vec![];
    for file_path in paths.iter() {
        let name = path::Path::new(file_path)
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return file_path.to_string());

        match fs::read(file_path).await {
            Ok(bytes) => files.push(UploadFile { name, bytes }),
            Err(err) => {
                tx.send(Event::AgentError(format!("Could not read {file_path}: {err}")))?;
                return Ok(());
            }
        }
    }

    match transport.upload_documents(files).await {
        Ok(message) => {
            tx.send(Event::AgentNotice(message))?;
        }
        Err(err) => {
            tx.send(Event::AgentError(format!("Uploading documents failed: {err}")))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Processes actions one at a time. Awaiting each exchange inline is
    /// what serializes turns: the next action cannot start until the current
    /// one has reported back with exactly one event.
    pub async fn start(
        transport: TransportBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            match action.unwrap() {
                Action::TurnRequest(text) => match transport.invoke(&text).await {
                    Ok(reply) => {
                        tx.send(Event::TurnResolved(reply))?;
                    }
                    Err(err) => {
                        tracing::error!(error = ?err, "turn failed");
                        tx.send(Event::TurnFailed(err))?;
                    }
                },
                Action::SessionList() => {
                    session_list(&transport, &tx).await?;
                }
                Action::SessionChange(name) => {
                    session_change(&transport, &tx, &name).await?;
                }
                Action::SessionRemove(name) => {
                    session_remove(&transport, &tx, &name).await?;
                }
                Action::DocumentUpload(paths) => {
                    document_upload(&transport, &tx, paths).await?;
                }
            }
        }
    }
}
