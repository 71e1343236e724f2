#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::Conversation;
use crate::domain::models::AgentReply;
use crate::domain::models::Author;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::TransportError;

const NO_RESPONSE: &str = "[No response]";
const NO_LOG: &str = "[No log]";

/// Outcome of handing user input to the controller.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// A turn was opened and the prompt should go out to the agent.
    Accepted(String),
    /// Input was empty after trimming. Nothing was appended.
    Rejected,
    /// A turn is already in flight. Nothing was appended.
    Busy,
}

/// Drives one turn at a time: append the user message synchronously, hand
/// the prompt out, then merge exactly one resolution back into the log. The
/// pending flag is what keeps a second turn from opening while the first is
/// in flight.
pub struct SessionController {
    pub conversation: Conversation,
    pending: bool,
}

impl Default for SessionController {
    fn default() -> SessionController {
        return SessionController {
            conversation: Conversation::default(),
            pending: false,
        };
    }
}

impl SessionController {
    pub fn is_pending(&self) -> bool {
        return self.pending;
    }

    pub fn submit(&mut self, input: &str) -> Submission {
        let text = input.trim();
        if text.is_empty() {
            return Submission::Rejected;
        }
        if self.pending {
            return Submission::Busy;
        }

        self.conversation.append(Author::User, text);
        self.pending = true;
        return Submission::Accepted(text.to_string());
    }

    /// Merges a successful reply into the log. Missing fields degrade to
    /// placeholders instead of failing the turn.
    pub fn resolve(&mut self, reply: AgentReply) -> &Message {
        let text = reply
            .response
            .unwrap_or_else(|| return NO_RESPONSE.to_string());
        let trace = reply
            .response_log
            .map_or_else(|| return NO_LOG.to_string(), |log| return log.to_text());

        self.pending = false;
        return self.conversation.append_reply(&text, &trace);
    }

    /// Ends the turn without an agent reply. The failure is surfaced through
    /// the same message channel as everything else, tagged as an error.
    pub fn fail(&mut self, err: &TransportError) -> &Message {
        self.pending = false;
        return self.conversation.append_with_type(
            Author::Confab,
            MessageType::Error,
            &format!("The agent failed with the following error: {err}"),
        );
    }

    /// Controlled replace for a re-activated server session. Refused while a
    /// turn is pending: the in-flight reply must land in the log it was
    /// issued against.
    pub fn restore(&mut self, entries: &[HistoryEntry]) -> bool {
        if self.pending {
            return false;
        }

        self.conversation.replace(entries);
        return true;
    }
}
