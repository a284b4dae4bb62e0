pub mod agent;
pub mod message;
pub mod token;

pub use agent::AgentInfo;
pub use message::{ChatMessage, ChatRole};
pub use token::{featured_tokens, ChartPoint, ChartUnit, CoinPrice, TokenInfo, TokenQuote};
