//! The chat session: the in-memory record of one conversation with the
//! assistant, plus the protocol that turns a user-authored string into
//! appended turns.
//!
//! A [`ChatSession`] is explicitly owned by whoever drives the conversation
//! (single writer, single reader); there is no shared or global session
//! state. Messages are append-only, the send protocol toggles `is_sending`
//! around its single suspension point, and the welcome flow fires at most
//! once per session.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::agent::client::AgentClient;
use crate::error::{ScoutError, ScoutResult};
use crate::models::ChatMessage;

/// Greeting appended once per session when the remote agent becomes known.
pub const WELCOME_MESSAGE: &str = "Greetings! I am here to assist you with all aspects of tokenomics. From analyzing token distribution to optimizing market strategies, I'm ready to help you achieve your crypto project's goals.\nHow can I assist you today?";

/// Progress of the once-per-session welcome flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WelcomeState {
    /// No caller identity assigned yet.
    #[default]
    Uninitialized,
    /// Local id assigned, remote agent not yet discovered.
    WaitingForAgent,
    /// Remote agent known and the conversation is still empty.
    Ready,
    /// The greeting has been appended; terminal.
    WelcomeSent,
}

/// Options for [`ChatSession::send`].
#[derive(Default)]
pub struct SendOptions {
    /// Append the text directly as an assistant turn, with no round trip and
    /// no `is_sending` toggle.
    pub system_message: bool,
    /// Opaque payload forwarded to the agent alongside the text.
    pub attachment: Option<serde_json::Value>,
    /// Checked after the suspension point; a cancelled send applies no reply.
    pub cancel: Option<CancellationToken>,
}

impl SendOptions {
    pub fn system() -> Self {
        Self {
            system_message: true,
            ..Self::default()
        }
    }
}

/// What a successful [`ChatSession::send`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendReceipt {
    /// Whitespace-only input; nothing happened.
    Ignored,
    /// Direct append, no round trip.
    System,
    /// Delivered to the agent; this many assistant turns were appended.
    Delivered { replies: usize },
}

/// Clears the in-flight flag on every exit path out of the send protocol,
/// including panics.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// One conversation with the assistant.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    is_sending: bool,
    draft: String,
    local_session_id: Option<String>,
    remote_agent_id: Option<String>,
    welcome: WelcomeState,
}

impl ChatSession {
    /// A fresh session: no turns, no identity, nothing in flight.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            is_sending: false,
            draft: String::new(),
            local_session_id: None,
            remote_agent_id: None,
            welcome: WelcomeState::Uninitialized,
        }
    }

    // ------------------------------------------------------------------
    // Message store
    // ------------------------------------------------------------------

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append one turn to the conversation. Positions are assigned in call
    /// order; appended turns are never mutated or removed.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Empties the conversation. Available for session reset; never invoked
    /// automatically.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    // ------------------------------------------------------------------
    // Draft input
    // ------------------------------------------------------------------

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft unconditionally. No validation here; the send
    /// protocol decides what is worth delivering.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    // ------------------------------------------------------------------
    // Agent selection & welcome flow
    // ------------------------------------------------------------------

    pub fn local_session_id(&self) -> Option<&str> {
        self.local_session_id.as_deref()
    }

    pub fn remote_agent_id(&self) -> Option<&str> {
        self.remote_agent_id.as_deref()
    }

    pub fn welcome_state(&self) -> WelcomeState {
        self.welcome
    }

    /// Assign the caller identity for this session.
    pub fn set_local_id(&mut self, id: impl Into<String>) {
        self.local_session_id = Some(id.into());
        if self.welcome == WelcomeState::Uninitialized {
            self.welcome = WelcomeState::WaitingForAgent;
        }
        self.try_enter_ready();
    }

    /// Generate and assign a fresh caller identity, returning it.
    pub fn generate_local_id(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.set_local_id(id.clone());
        id
    }

    /// Record the discovered remote agent. Arms the welcome flow only while
    /// the conversation is still empty; a redundant discovery callback after
    /// the welcome fired is a no-op.
    pub fn set_remote_id(&mut self, id: impl Into<String>) {
        self.remote_agent_id = Some(id.into());
        self.try_enter_ready();
    }

    /// `WaitingForAgent -> Ready`, gated on both ids being known and the
    /// conversation still being empty.
    fn try_enter_ready(&mut self) {
        if self.welcome == WelcomeState::WaitingForAgent
            && self.remote_agent_id.is_some()
            && self.messages.is_empty()
        {
            self.welcome = WelcomeState::Ready;
        }
    }

    /// True when the greeting should be appended.
    pub fn welcome_pending(&self) -> bool {
        self.welcome == WelcomeState::Ready
    }

    /// Append the fixed greeting, at most once per session. Never toggles
    /// `is_sending`. Returns whether the greeting was appended.
    pub fn send_welcome(&mut self) -> bool {
        if self.welcome != WelcomeState::Ready {
            return false;
        }
        self.append(ChatMessage::assistant(WELCOME_MESSAGE));
        self.welcome = WelcomeState::WelcomeSent;
        debug!("Welcome message appended");
        true
    }

    /// The agent a send addresses right now: the discovered remote agent,
    /// else the local session id.
    pub fn active_agent_id(&self) -> Option<&str> {
        self.remote_agent_id
            .as_deref()
            .or(self.local_session_id.as_deref())
    }

    // ------------------------------------------------------------------
    // Send protocol
    // ------------------------------------------------------------------

    /// Turn a user-authored string into appended turns.
    ///
    /// Whitespace-only input is silently ignored. A system send appends one
    /// assistant turn directly. A regular send appends the user turn, clears
    /// the draft, delivers the text through `client`, and appends either the
    /// normalized replies or a single system turn carrying the failure.
    /// Every failure of the agent client is absorbed into the message list;
    /// the returned error exists for programmatic inspection only.
    pub async fn send<C>(
        &mut self,
        client: &C,
        text: &str,
        options: SendOptions,
    ) -> ScoutResult<SendReceipt>
    where
        C: AgentClient + ?Sized,
    {
        if text.trim().is_empty() {
            return Ok(SendReceipt::Ignored);
        }

        if options.system_message {
            self.append(ChatMessage::assistant(text));
            return Ok(SendReceipt::System);
        }

        let Some(agent_id) = self.active_agent_id().map(str::to_string) else {
            warn!("Send attempted with no agent selected");
            self.append(ChatMessage::system("Error: No agent selected"));
            return Err(ScoutError::NoAgentSelected);
        };

        if self.is_sending {
            return Err(ScoutError::SendInFlight);
        }

        let caller_id = self.local_session_id.clone().unwrap_or_default();

        let sending = InFlight::begin(&mut self.is_sending);

        self.messages.push(ChatMessage::user(text));
        self.draft.clear();

        let result = client
            .send_message(&agent_id, text, options.attachment.as_ref(), &caller_id)
            .await;

        if let Some(cancel) = &options.cancel {
            if cancel.is_cancelled() {
                debug!("Send cancelled after suspension point; dropping reply");
                drop(sending);
                return Err(ScoutError::SendCancelled);
            }
        }

        match result {
            Ok(reply) => {
                let parts = reply.into_replies();
                let count = parts.len();
                for part in parts {
                    let content = part.display_text().to_string();
                    self.messages
                        .push(ChatMessage::assistant(content).with_url(part.url));
                }
                Ok(SendReceipt::Delivered { replies: count })
            }
            Err(err) => {
                self.messages
                    .push(ChatMessage::system(format!("Error: {}", err)));
                Err(err)
            }
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
