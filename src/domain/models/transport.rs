use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

use super::AgentReply;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("the agent server could not be reached: {0}")]
    Connection(#[source] reqwest::Error),
    #[error("the agent server answered with status {0}")]
    Status(u16),
    #[error("the agent reply could not be parsed: {0}")]
    MalformedReply(#[source] serde_json::Error),
}

/// One restored entry from a server side session: the user line and, when
/// the agent answered it, the reply text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry(pub String, pub Option<String>);

/// A document queued for upload, already read off disk so the transport
/// stays a pure network client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub type TransportBox = Box<dyn Transport + Send + Sync>;

#[async_trait]
pub trait Transport {
    /// Used at startup to verify the agent server is reachable before the
    /// first turn is submitted.
    async fn health_check(&self) -> Result<(), TransportError>;

    /// One full turn exchange: sends the user text, returns the agent reply.
    /// Exactly one outcome per call; the caller decides retry policy.
    async fn invoke(&self, message: &str) -> Result<AgentReply, TransportError>;

    /// Lists the sessions currently open on the agent server.
    async fn list_sessions(&self) -> Result<Vec<String>, TransportError>;

    /// Activates the named server session and returns its chat history for
    /// the conversation store to replace its log with.
    async fn change_session(&self, name: &str) -> Result<Vec<HistoryEntry>, TransportError>;

    /// Removes the named server session. Returns the server's confirmation
    /// message.
    async fn remove_session(&self, name: &str) -> Result<String, TransportError>;

    /// Uploads documents for the agent's retrieval database. Returns the
    /// server's confirmation message.
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<String, TransportError>;
}
