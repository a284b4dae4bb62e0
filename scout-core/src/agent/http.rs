use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::agent::client::{AgentClient, AgentReply};
use crate::config::AgentApiConfig;
use crate::error::{ScoutError, ScoutResult};
use crate::models::AgentInfo;

/// Reqwest-backed [`AgentClient`] against the assistant's REST API.
pub struct HttpAgentClient {
    client: Client,
    base_url: String,
    /// Stable user handle included in message payloads, distinct from the
    /// per-session caller id.
    user_handle: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AgentsEnvelope {
    #[serde(default)]
    agents: Vec<AgentInfo>,
}

impl HttpAgentClient {
    pub fn new(config: &AgentApiConfig) -> ScoutResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScoutError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_handle: None,
        })
    }

    pub fn with_user_handle(mut self, handle: impl Into<String>) -> Self {
        self.user_handle = Some(handle.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn list_agents(&self) -> ScoutResult<Vec<AgentInfo>> {
        let url = format!("{}/agents", self.base_url);
        debug!(url = %url, "Fetching agent directory");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ScoutError::AgentRequestFailed(format!(
                "agent directory returned status {}",
                response.status()
            )));
        }

        let envelope = response
            .json::<AgentsEnvelope>()
            .await
            .map_err(|e| ScoutError::AgentParseError(e.to_string()))?;

        Ok(envelope.agents)
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        attachment: Option<&serde_json::Value>,
        caller_id: &str,
    ) -> ScoutResult<AgentReply> {
        let url = format!("{}/{}/message", self.base_url, agent_id);

        let mut payload = serde_json::json!({
            "text": text,
            "userId": caller_id,
        });
        if let Some(handle) = &self.user_handle {
            payload["userName"] = serde_json::Value::String(handle.clone());
        }
        if let Some(attachment) = attachment {
            payload["attachment"] = attachment.clone();
        }

        debug!(url = %url, agent_id = %agent_id, "Sending message to agent");

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(ScoutError::AgentRequestFailed(format!(
                "agent returned status {}",
                response.status()
            )));
        }

        response
            .json::<AgentReply>()
            .await
            .map_err(|e| ScoutError::AgentParseError(e.to_string()))
    }
}
