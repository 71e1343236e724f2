#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AgentReply;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Transport;
use crate::domain::models::TransportError;
use crate::domain::models::UploadFile;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct InvokeRequest {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionListResponse {
    pub open_sessions: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionChangeResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub display: Vec<HistoryEntry>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRemoveResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UploadResponse {
    pub message: String,
}

pub struct AgentClient {
    url: String,
    timeout: String,
    health_check_timeout: String,
}

impl Default for AgentClient {
    fn default() -> AgentClient {
        return AgentClient {
            url: Config::get(ConfigKey::AgentUrl),
            timeout: Config::get(ConfigKey::TransportTimeout),
            health_check_timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl AgentClient {
    fn request_timeout(&self) -> Duration {
        return Duration::from_millis(self.timeout.parse::<u64>().unwrap_or(120_000));
    }

    async fn parse_body<T: serde::de::DeserializeOwned>(
        res: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = res.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "agent server request failed");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = res.text().await.map_err(TransportError::Connection)?;
        return serde_json::from_str::<T>(&body).map_err(TransportError::MalformedReply);
    }
}

#[async_trait]
impl Transport for AgentClient {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<(), TransportError> {
        let res = reqwest::Client::new()
            .get(format!("{url}/open_sessions", url = self.url))
            .timeout(Duration::from_millis(
                self.health_check_timeout.parse::<u64>().unwrap_or(1000),
            ))
            .send()
            .await
            .map_err(TransportError::Connection)?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "agent health check failed");
            return Err(TransportError::Status(res.status().as_u16()));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn invoke(&self, message: &str) -> Result<AgentReply, TransportError> {
        let req = InvokeRequest {
            message: message.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/invoke", url = self.url))
            .timeout(self.request_timeout())
            .json(&req)
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let reply = AgentClient::parse_body::<AgentReply>(res).await?;
        tracing::debug!(body = ?reply, "agent reply");

        return Ok(reply);
    }

    #[allow(clippy::implicit_return)]
    async fn list_sessions(&self) -> Result<Vec<String>, TransportError> {
        let res = reqwest::Client::new()
            .get(format!("{url}/open_sessions", url = self.url))
            .timeout(self.request_timeout())
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let listing = AgentClient::parse_body::<SessionListResponse>(res).await?;
        return Ok(listing.open_sessions);
    }

    #[allow(clippy::implicit_return)]
    async fn change_session(&self, name: &str) -> Result<Vec<HistoryEntry>, TransportError> {
        let req = InvokeRequest {
            message: name.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/change_session", url = self.url))
            .timeout(self.request_timeout())
            .json(&req)
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let changed = AgentClient::parse_body::<SessionChangeResponse>(res).await?;
        return Ok(changed.display);
    }

    #[allow(clippy::implicit_return)]
    async fn remove_session(&self, name: &str) -> Result<String, TransportError> {
        let req = InvokeRequest {
            message: name.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/remove_session", url = self.url))
            .timeout(self.request_timeout())
            .json(&req)
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let removed = AgentClient::parse_body::<SessionRemoveResponse>(res).await?;
        return Ok(removed.message);
    }

    #[allow(clippy::implicit_return)]
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<String, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
            form = form.part("rag_files", part);
        }

        let res = reqwest::Client::new()
            .post(format!("{url}/rag_upload", url = self.url))
            .timeout(self.request_timeout())
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Connection)?;

        let uploaded = AgentClient::parse_body::<UploadResponse>(res).await?;
        return Ok(uploaded.message);
    }
}
