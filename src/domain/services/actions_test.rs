use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::AgentReply;
use crate::domain::models::Event;
use crate::domain::models::HistoryEntry;
use crate::domain::models::ReplyLog;
use crate::domain::models::Transport;
use crate::domain::models::TransportError;
use crate::domain::models::UploadFile;

struct StubTransport {
    fail: bool,
}

#[async_trait]
impl Transport for StubTransport {
    async fn health_check(&self) -> Result<(), TransportError> {
        return Ok(());
    }

    async fn invoke(&self, message: &str) -> Result<AgentReply, TransportError> {
        if self.fail {
            return Err(TransportError::Status(500));
        }

        return Ok(AgentReply {
            response: Some(format!("echo: {message}")),
            response_log: Some(ReplyLog::Text("trace".to_string())),
        });
    }

    async fn list_sessions(&self) -> Result<Vec<String>, TransportError> {
        if self.fail {
            return Err(TransportError::Status(500));
        }

        return Ok(vec!["alpha".to_string(), "beta".to_string()]);
    }

    async fn change_session(&self, _name: &str) -> Result<Vec<HistoryEntry>, TransportError> {
        return Ok(vec![HistoryEntry(
            "restored".to_string(),
            Some("answer".to_string()),
        )]);
    }

    async fn remove_session(&self, name: &str) -> Result<String, TransportError> {
        return Ok(format!("Session '{name}' removed."));
    }

    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<String, TransportError> {
        return Ok(format!("{} files uploaded", files.len()));
    }
}

fn start_service(fail: bool) -> (mpsc::UnboundedSender<Action>, mpsc::UnboundedReceiver<Event>) {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        return ActionsService::start(Box::new(StubTransport { fail }), event_tx, &mut action_rx)
            .await;
    });

    return (action_tx, event_rx);
}

#[tokio::test]
async fn it_resolves_turns() -> Result<()> {
    let (tx, mut rx) = start_service(false);
    tx.send(Action::TurnRequest("hello".to_string()))?;

    match rx.recv().await.unwrap() {
        Event::TurnResolved(reply) => {
            assert_eq!(reply.response, Some("echo: hello".to_string()));
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_turns() -> Result<()> {
    let (tx, mut rx) = start_service(true);
    tx.send(Action::TurnRequest("hello".to_string()))?;

    match rx.recv().await.unwrap() {
        Event::TurnFailed(TransportError::Status(status)) => {
            assert_eq!(status, 500);
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_resolves_turns_in_submission_order() -> Result<()> {
    let (tx, mut rx) = start_service(false);
    tx.send(Action::TurnRequest("one".to_string()))?;
    tx.send(Action::TurnRequest("two".to_string()))?;

    let mut responses: Vec<String> = vec![];
    for _ in 0..2 {
        match rx.recv().await.unwrap() {
            Event::TurnResolved(reply) => responses.push(reply.response.unwrap()),
            _ => bail!("Wrong event type"),
        }
    }

    assert_eq!(responses, vec!["echo: one".to_string(), "echo: two".to_string()]);

    return Ok(());
}

#[tokio::test]
async fn it_formats_session_listings() -> Result<()> {
    let (tx, mut rx) = start_service(false);
    tx.send(Action::SessionList())?;

    match rx.recv().await.unwrap() {
        Event::AgentNotice(text) => {
            assert_eq!(text, "- (1) alpha\n- (2) beta".to_string());
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_session_listing_failures() -> Result<()> {
    let (tx, mut rx) = start_service(true);
    tx.send(Action::SessionList())?;

    match rx.recv().await.unwrap() {
        Event::AgentError(text) => {
            assert!(text.contains("Listing sessions failed"));
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_restores_sessions() -> Result<()> {
    let (tx, mut rx) = start_service(false);
    tx.send(Action::SessionChange("october-14".to_string()))?;

    match rx.recv().await.unwrap() {
        Event::SessionRestored(name, entries) => {
            assert_eq!(name, "october-14".to_string());
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].0, "restored".to_string());
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_unreadable_upload_paths() -> Result<()> {
    let (tx, mut rx) = start_service(false);
    tx.send(Action::DocumentUpload(vec![
        "/definitely/not/a/real/path.pdf".to_string(),
    ]))?;

    match rx.recv().await.unwrap() {
        Event::AgentError(text) => {
            assert!(text.contains("Could not read"));
        }
        _ => bail!("Wrong event type"),
    }

    return Ok(());
}
