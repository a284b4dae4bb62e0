pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod prices;

pub use agent::{AgentClient, AgentReply, HttpAgentClient, ReplyPart, NO_RESPONSE_PLACEHOLDER};
pub use chat::{ChatSession, SendOptions, SendReceipt, WelcomeState, WELCOME_MESSAGE};
pub use config::{
    ensure_cache_dir, ensure_config_dir, ensure_data_dir, get_cache_dir, get_config_dir,
    get_data_dir, AgentApiConfig, ConfigLoadError, DisplayConfig, LoggingConfig, PricesConfig,
    ScoutConfig,
};
pub use error::{CliErrorDisplay, ScoutError, ScoutResult};
pub use models::{
    featured_tokens, AgentInfo, ChartPoint, ChartUnit, ChatMessage, ChatRole, CoinPrice,
    TokenInfo, TokenQuote,
};
pub use prices::{CachedPriceFeed, PriceCache, PriceClient, PriceTicker, CACHE_FILE_NAME};
