//! The seam between chat sessions and the remote assistant.
//!
//! The wire format is loose: a send may come back as a single reply object or
//! as an ordered list of them, and either `text` or `message` may carry the
//! body. [`AgentReply`] captures both shapes as a tagged union and
//! [`AgentReply::into_replies`] normalizes them into one ordered list, so the
//! session logic only ever deals with `Vec<ReplyPart>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ScoutResult;
use crate::models::AgentInfo;

/// Substituted when a reply carries neither `text` nor `message`.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response received";

/// Client for the remote assistant service.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Fetch the agent directory. The session adopts the first entry.
    async fn list_agents(&self) -> ScoutResult<Vec<AgentInfo>>;

    /// Deliver one user message and wait for the reply. This is the single
    /// point of asynchronous suspension in the send protocol; there is no
    /// retry here.
    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        attachment: Option<&serde_json::Value>,
        caller_id: &str,
    ) -> ScoutResult<AgentReply>;
}

/// One reply object as it appears on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ReplyPart {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            text: Some(body.into()),
            ..Self::default()
        }
    }

    /// Body of the reply: `text` wins over `message`, and a reply carrying
    /// neither yields the fixed placeholder.
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or(NO_RESPONSE_PLACEHOLDER)
    }
}

/// The two reply shapes observed from the agent service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentReply {
    Many(Vec<ReplyPart>),
    One(ReplyPart),
}

impl AgentReply {
    /// Normalize into an ordered list; a single object becomes a one-element
    /// list.
    pub fn into_replies(self) -> Vec<ReplyPart> {
        match self {
            AgentReply::Many(parts) => parts,
            AgentReply::One(part) => vec![part],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AgentReply::Many(parts) => parts.len(),
            AgentReply::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_normalizes_to_one_reply() {
        let reply: AgentReply =
            serde_json::from_str(r#"{"text": "Your balance is 10 SONIC"}"#).unwrap();
        let parts = reply.into_replies();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].display_text(), "Your balance is 10 SONIC");
    }

    #[test]
    fn test_list_preserves_order() {
        let reply: AgentReply = serde_json::from_str(
            r#"[{"text": "first"}, {"message": "second"}, {"text": "third", "url": "https://sonicscan.org"}]"#,
        )
        .unwrap();
        let parts = reply.into_replies();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].display_text(), "first");
        assert_eq!(parts[1].display_text(), "second");
        assert_eq!(parts[2].display_text(), "third");
        assert_eq!(parts[2].url.as_deref(), Some("https://sonicscan.org"));
    }

    #[test]
    fn test_text_wins_over_message() {
        let part = ReplyPart {
            text: Some("from text".to_string()),
            message: Some("from message".to_string()),
            url: None,
        };
        assert_eq!(part.display_text(), "from text");
    }

    #[test]
    fn test_missing_body_substitutes_placeholder() {
        let reply: AgentReply = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        let parts = reply.into_replies();
        assert_eq!(parts[0].display_text(), NO_RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_empty_list_is_empty() {
        let reply: AgentReply = serde_json::from_str("[]").unwrap();
        assert!(reply.is_empty());
        assert!(reply.into_replies().is_empty());
    }
}
