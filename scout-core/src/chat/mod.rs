pub mod session;

pub use session::{ChatSession, SendOptions, SendReceipt, WelcomeState, WELCOME_MESSAGE};
