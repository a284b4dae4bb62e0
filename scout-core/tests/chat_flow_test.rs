#![allow(dead_code, unused_imports, unused_variables, unused_mut)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

use scout_core::{
    AgentClient, AgentInfo, AgentReply, ChatRole, ChatSession, ReplyPart, ScoutError, ScoutResult,
    SendOptions, SendReceipt, WelcomeState, NO_RESPONSE_PLACEHOLDER, WELCOME_MESSAGE,
};

/// Scripted agent client: answers each send with the next queued result and
/// records every delivery it saw.
struct MockAgentClient {
    agents: Vec<AgentInfo>,
    replies: Mutex<VecDeque<ScoutResult<AgentReply>>>,
    deliveries: Mutex<Vec<Delivery>>,
}

#[derive(Debug, Clone)]
struct Delivery {
    agent_id: String,
    text: String,
    caller_id: String,
}

impl MockAgentClient {
    fn new() -> Self {
        Self {
            agents: vec![AgentInfo::new("agent-7")],
            replies: Mutex::new(VecDeque::new()),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    fn queue_reply(&self, reply: AgentReply) {
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    fn queue_error(&self, error: ScoutError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn list_agents(&self) -> ScoutResult<Vec<AgentInfo>> {
        Ok(self.agents.clone())
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        _attachment: Option<&serde_json::Value>,
        caller_id: &str,
    ) -> ScoutResult<AgentReply> {
        self.deliveries.lock().unwrap().push(Delivery {
            agent_id: agent_id.to_string(),
            text: text.to_string(),
            caller_id: caller_id.to_string(),
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AgentReply::One(ReplyPart::text("ok"))))
    }
}

fn ready_session() -> ChatSession {
    let mut session = ChatSession::new();
    session.set_local_id("caller-1");
    session.set_remote_id("agent-7");
    session
}

#[tokio::test]
async fn user_turn_precedes_reply() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("hello back")));

    let mut session = ready_session();
    session
        .send(&client, "hello there", SendOptions::default())
        .await
        .unwrap();

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "hello there");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert_eq!(messages[1].content, "hello back");
}

#[tokio::test]
async fn empty_and_whitespace_sends_are_no_ops() {
    let client = MockAgentClient::new();
    let mut session = ready_session();

    let receipt = session.send(&client, "", SendOptions::default()).await;
    assert_eq!(receipt.unwrap(), SendReceipt::Ignored);

    let receipt = session.send(&client, "   ", SendOptions::default()).await;
    assert_eq!(receipt.unwrap(), SendReceipt::Ignored);

    assert!(session.messages().is_empty());
    assert!(!session.is_sending());
    assert!(client.deliveries().is_empty());
}

#[tokio::test]
async fn send_without_agent_surfaces_one_system_error() {
    let client = MockAgentClient::new();
    let mut session = ChatSession::new();
    session.set_draft("hello");

    let result = session.send(&client, "hello", SendOptions::default()).await;
    assert!(matches!(result, Err(ScoutError::NoAgentSelected)));

    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::System);
    assert!(messages[0].content.starts_with("Error:"));
    assert!(!session.is_sending());
    // The draft survives a fast-fail.
    assert_eq!(session.draft(), "hello");
    assert!(client.deliveries().is_empty());
}

#[tokio::test]
async fn is_sending_clears_after_success_and_failure() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("fine")));
    client.queue_error(ScoutError::AgentRequestFailed("boom".to_string()));

    let mut session = ready_session();

    session
        .send(&client, "first", SendOptions::default())
        .await
        .unwrap();
    assert!(!session.is_sending());

    let result = session.send(&client, "second", SendOptions::default()).await;
    assert!(result.is_err());
    assert!(!session.is_sending());
}

#[tokio::test]
async fn reply_list_appends_in_order() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::Many(vec![
        ReplyPart::text("one"),
        ReplyPart::text("two"),
        ReplyPart::text("three"),
    ]));

    let mut session = ready_session();
    let receipt = session
        .send(&client, "count to three", SendOptions::default())
        .await
        .unwrap();
    assert_eq!(receipt, SendReceipt::Delivered { replies: 3 });

    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    let bodies: Vec<&str> = messages[1..].iter().map(|m| m.content.as_str()).collect();
    assert_eq!(bodies, vec!["one", "two", "three"]);
    assert!(messages[1..]
        .iter()
        .all(|m| m.role == ChatRole::Assistant));
}

#[tokio::test]
async fn reply_without_body_uses_placeholder() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart {
        text: None,
        message: None,
        url: Some("https://sonicscan.org".to_string()),
    }));

    let mut session = ready_session();
    session
        .send(&client, "anything", SendOptions::default())
        .await
        .unwrap();

    let reply = &session.messages()[1];
    assert_eq!(reply.content, NO_RESPONSE_PLACEHOLDER);
    assert_eq!(reply.url.as_deref(), Some("https://sonicscan.org"));
}

#[tokio::test]
async fn welcome_scenario_fresh_session() {
    // Fresh session, remote id resolves to "agent-7", messages empty.
    let mut session = ChatSession::new();
    session.set_local_id("caller-1");
    session.set_remote_id("agent-7");

    assert!(session.welcome_pending());
    assert!(session.send_welcome());

    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Assistant);
    assert_eq!(messages[0].content, WELCOME_MESSAGE);
    assert!(!session.is_sending());

    // Redundant effect re-run with messages already non-empty.
    session.set_remote_id("agent-7");
    assert!(!session.send_welcome());
    assert_eq!(session.messages().len(), 1);
}

#[tokio::test]
async fn balance_round_trip_scenario() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text(
        "Your balance is 10 SONIC",
    )));

    let mut session = ready_session();
    session
        .send(&client, "Check my balance", SendOptions::default())
        .await
        .unwrap();

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "Check my balance");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert_eq!(messages[1].content, "Your balance is 10 SONIC");
    assert!(!session.is_sending());
}

#[tokio::test]
async fn failing_client_surfaces_error_scenario() {
    let client = MockAgentClient::new();
    client.queue_error(ScoutError::AgentRequestFailed("timeout".to_string()));

    let mut session = ready_session();
    let result = session.send(&client, "ping", SendOptions::default()).await;
    assert!(result.is_err());

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "ping");
    assert_eq!(messages[1].role, ChatRole::System);
    assert!(messages[1].content.starts_with("Error:"));
    assert!(messages[1].content.contains("timeout"));
    assert!(!session.is_sending());
}

#[tokio::test]
async fn system_send_appends_assistant_turn_without_round_trip() {
    let client = MockAgentClient::new();
    let mut session = ready_session();

    let receipt = session
        .send(&client, "Service notice", SendOptions::system())
        .await
        .unwrap();
    assert_eq!(receipt, SendReceipt::System);

    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Assistant);
    assert_eq!(messages[0].content, "Service notice");
    assert!(!session.is_sending());
    assert!(client.deliveries().is_empty());
}

#[tokio::test]
async fn cancelled_send_applies_no_reply() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("too late")));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut session = ready_session();
    let result = session
        .send(
            &client,
            "going away",
            SendOptions {
                cancel: Some(cancel),
                ..SendOptions::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ScoutError::SendCancelled)));
    // The user turn was already appended before the suspension point; the
    // reply is dropped.
    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::User);
    assert!(!session.is_sending());
}

#[tokio::test]
async fn send_clears_draft_on_hand_off() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("done")));

    let mut session = ready_session();
    session.set_draft("Check my balance");

    session
        .send(&client, "Check my balance", SendOptions::default())
        .await
        .unwrap();
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn send_addresses_remote_agent_with_caller_id() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("ack")));

    let mut session = ready_session();
    session
        .send(&client, "hello", SendOptions::default())
        .await
        .unwrap();

    let deliveries = client.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].agent_id, "agent-7");
    assert_eq!(deliveries[0].text, "hello");
    assert_eq!(deliveries[0].caller_id, "caller-1");
}

#[tokio::test]
async fn send_falls_back_to_local_id_without_remote() {
    let client = MockAgentClient::new();
    client.queue_reply(AgentReply::One(ReplyPart::text("ack")));

    let mut session = ChatSession::new();
    session.set_local_id("caller-1");

    session
        .send(&client, "hello", SendOptions::default())
        .await
        .unwrap();

    let deliveries = client.deliveries();
    assert_eq!(deliveries[0].agent_id, "caller-1");
}
