#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

/// One entry in the conversation log. Ids are handed out by the conversation
/// store; nothing else constructs them in normal operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub author: Author,
    pub text: String,
    trace: Option<String>,
    mtype: MessageType,
}

fn wrap_text(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for full_line in text.split('\n') {
        if full_line.trim().is_empty() {
            lines.push(" ".to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_lines: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            if word.len() + char_count + 1 > line_max_width && !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
                current_lines = vec![word];
                char_count = word.len() + 1;
            } else {
                current_lines.push(word);
                char_count += word.len() + 1;
            }
        }
        if !current_lines.is_empty() {
            lines.push(current_lines.join(" ").trim_end().to_string());
        }
    }

    return lines;
}

impl Message {
    pub fn new(id: u64, author: Author, text: &str) -> Message {
        return Message {
            id,
            author,
            text: text.to_string().replace('\t', "  "),
            trace: None,
            mtype: MessageType::Normal,
        };
    }

    pub fn new_with_type(id: u64, author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            id,
            author,
            text: text.to_string().replace('\t', "  "),
            trace: None,
            mtype,
        };
    }

    pub fn new_with_trace(id: u64, author: Author, text: &str, trace: &str) -> Message {
        return Message {
            id,
            author,
            text: text.to_string().replace('\t', "  "),
            trace: Some(trace.to_string().replace('\t', "  ")),
            mtype: MessageType::Normal,
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn trace(&self) -> Option<&str> {
        return self.trace.as_deref();
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        return wrap_text(&self.text, line_max_width);
    }

    pub fn trace_string_lines(&self, line_max_width: usize) -> Option<Vec<String>> {
        return self
            .trace
            .as_ref()
            .map(|trace| return wrap_text(trace, line_max_width));
    }
}
