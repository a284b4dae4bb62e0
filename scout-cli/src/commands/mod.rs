pub mod agents;
pub mod chat;
pub mod prices;

pub use agents::handle_agents_command;
pub use chat::handle_chat_command;
pub use prices::{handle_prices_command, PricesCommand};
