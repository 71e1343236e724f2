#[cfg(test)]
#[path = "reply_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One full reply from the agent. Both fields are optional on the wire; the
/// session controller substitutes placeholders for whatever is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    pub response: Option<String>,
    #[serde(rename = "response-log")]
    pub response_log: Option<ReplyLog>,
}

/// The diagnostic log attached to a reply. The protocol documents a plain
/// string, but the agent server emits its retrieval pipeline as a list of
/// `(stage, [lines])` pairs; both shapes are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyLog {
    Text(String),
    Stages(Vec<(String, Vec<String>)>),
}

impl ReplyLog {
    pub fn to_text(&self) -> String {
        match self {
            ReplyLog::Text(text) => return text.to_string(),
            ReplyLog::Stages(stages) => {
                let res = stages
                    .iter()
                    .map(|(stage, lines)| {
                        let mut block = vec![format!("{stage}:")];
                        block.extend(lines.iter().map(|line| return format!("  - {line}")));
                        return block.join("\n");
                    })
                    .collect::<Vec<String>>();

                return res.join("\n");
            }
        }
    }
}
