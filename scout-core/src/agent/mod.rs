pub mod client;
pub mod http;

pub use client::{AgentClient, AgentReply, ReplyPart, NO_RESPONSE_PLACEHOLDER};
pub use http::HttpAgentClient;
