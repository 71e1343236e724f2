#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

/// The ordered message log. Sole owner of message order and of the id
/// counter: ids are handed out sequentially and never reused, not even
/// across `replace`, so anything keyed by id stays coherent.
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Conversation {
        return Conversation {
            messages: vec![],
            next_id: 1,
        };
    }
}

impl Conversation {
    fn assign_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        return id;
    }

    pub fn append(&mut self, author: Author, text: &str) -> &Message {
        let id = self.assign_id();
        self.messages.push(Message::new(id, author, text));
        return self.messages.last().unwrap();
    }

    pub fn append_with_type(&mut self, author: Author, mtype: MessageType, text: &str) -> &Message {
        let id = self.assign_id();
        self.messages
            .push(Message::new_with_type(id, author, mtype, text));
        return self.messages.last().unwrap();
    }

    pub fn append_reply(&mut self, text: &str, trace: &str) -> &Message {
        let id = self.assign_id();
        self.messages
            .push(Message::new_with_trace(id, Author::Agent, text, trace));
        return self.messages.last().unwrap();
    }

    /// The one controlled exception to append-only ordering: rebuilds the
    /// log from a restored server session. The id counter carries on from
    /// where it was.
    pub fn replace(&mut self, entries: &[HistoryEntry]) {
        self.messages.clear();
        for HistoryEntry(user, reply) in entries {
            self.append(Author::User, user);
            if let Some(reply) = reply {
                self.append(Author::Agent, reply);
            }
        }
    }

    /// The ordered log for rendering. Read-only for callers.
    pub fn snapshot(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }
}
