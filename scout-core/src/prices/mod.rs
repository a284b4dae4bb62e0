pub mod cache;
pub mod client;
pub mod ticker;

pub use cache::{CachedPriceFeed, PriceCache, CACHE_FILE_NAME};
pub use client::PriceClient;
pub use ticker::PriceTicker;
