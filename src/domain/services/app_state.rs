#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use super::SessionController;
use super::Submission;
use super::Themes;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::HistoryEntry;
use crate::domain::models::MessageType;
use crate::domain::models::Settings;
use crate::domain::models::SlashCommand;
use crate::domain::models::TransportBox;

pub struct AppState {
    pub controller: SessionController,
    pub settings: Settings,
    pub bubble_list: BubbleList,
    pub scroll: Scroll,
    pub waiting_for_agent: bool,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl AppState {
    pub async fn new(transport: &TransportBox) -> Result<AppState> {
        let settings = Settings::default();
        let theme = Themes::get(&settings.theme_name)?;

        let mut app_state = AppState {
            controller: SessionController::default(),
            settings,
            bubble_list: BubbleList::new(theme),
            scroll: Scroll::default(),
            waiting_for_agent: false,
            last_known_width: 0,
            last_known_height: 0,
        };

        app_state
            .controller
            .conversation
            .append(Author::Agent, "Hey there! What can I do for you?");

        if let Err(err) = transport.health_check().await {
            app_state.controller.conversation.append_with_type(
                Author::Confab,
                MessageType::Error,
                &format!("Hey, it looks like the agent server isn't running, I can't connect to it. You should double check that before we start talking, otherwise every turn will fail.\n\nError: {err}"),
            );
        }

        app_state.sync_dependants();
        return Ok(app_state);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Handles a submitted line: slash commands first, anything else opens a
    /// turn. Returns true when the app should quit.
    pub fn handle_enter(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(false);
        }

        if let Some(command) = SlashCommand::parse(text) {
            return self.handle_slash_command(&command, text, tx);
        }

        match self.controller.submit(text) {
            Submission::Accepted(prompt) => {
                self.waiting_for_agent = true;
                tx.send(Action::TurnRequest(prompt))?;
            }
            Submission::Rejected | Submission::Busy => {}
        }

        self.sync_dependants();
        self.scroll.last();
        return Ok(false);
    }

    fn handle_slash_command(
        &mut self,
        command: &SlashCommand,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        if command.is_quit() {
            return Ok(true);
        }

        self.controller.conversation.append(Author::User, text);

        if command.is_help() {
            self.controller
                .conversation
                .append(Author::Confab, &help_text());
        } else if command.is_session_list() {
            self.waiting_for_agent = true;
            tx.send(Action::SessionList())?;
        } else if command.is_session_change() {
            if command.args.is_empty() {
                self.append_error(
                    "You must name a session with `/session`. Run `/sessions` to list them.",
                );
            } else {
                self.waiting_for_agent = true;
                tx.send(Action::SessionChange(command.args[0].to_string()))?;
            }
        } else if command.is_session_remove() {
            if command.args.is_empty() {
                self.append_error(
                    "You must name a session with `/rmsession`. Run `/sessions` to list them.",
                );
            } else {
                self.waiting_for_agent = true;
                tx.send(Action::SessionRemove(command.args[0].to_string()))?;
            }
        } else if command.is_upload() {
            if command.args.is_empty() {
                self.append_error("You must pass at least one file path with `/upload`.");
            } else {
                self.waiting_for_agent = true;
                tx.send(Action::DocumentUpload(command.args.clone()))?;
            }
        }

        self.sync_dependants();
        self.scroll.last();
        return Ok(false);
    }

    /// Applies agent-side events. Keyboard events are handled by the render
    /// loop and never reach here.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::TurnResolved(reply) => {
                self.controller.resolve(reply);
                self.waiting_for_agent = false;
            }
            Event::TurnFailed(err) => {
                self.controller.fail(&err);
                self.waiting_for_agent = false;
            }
            Event::AgentNotice(text) => {
                self.controller.conversation.append(Author::Confab, &text);
                self.waiting_for_agent = false;
            }
            Event::AgentError(text) => {
                self.append_error(&text);
                self.waiting_for_agent = false;
            }
            Event::SessionRestored(name, entries) => {
                self.handle_session_restored(&name, &entries);
            }
            _ => (),
        }

        self.sync_dependants();
        self.scroll.last();
    }

    fn handle_session_restored(&mut self, name: &str, entries: &[HistoryEntry]) {
        self.waiting_for_agent = false;
        if self.controller.restore(entries) {
            self.controller
                .conversation
                .append(Author::Confab, &format!("Session '{name}' activated."));
        }
    }

    pub fn cycle_theme(&mut self) -> Result<()> {
        self.settings.cycle_theme(&Themes::list());
        self.bubble_list
            .set_theme(Themes::get(&self.settings.theme_name)?);
        self.sync_dependants();
        return Ok(());
    }

    pub fn toggle_traces(&mut self) {
        self.settings.toggle_traces();
        self.sync_dependants();
    }

    fn append_error(&mut self, text: &str) {
        self.controller
            .conversation
            .append_with_type(Author::Confab, MessageType::Error, text);
    }

    /// The store's re-render notification: every mutation funnels through
    /// here so the bubble cache and scrollbar always reflect the log.
    pub fn sync_dependants(&mut self) {
        self.bubble_list.set_messages(
            self.controller.conversation.snapshot(),
            self.last_known_width as usize,
            self.settings.show_traces,
        );

        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height as usize);

        if self.waiting_for_agent {
            self.scroll.last();
        }
    }
}
