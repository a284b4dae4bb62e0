//! Background refresh loop for the market widget.
//!
//! Polls the cached feed on a fixed interval and broadcasts the quote list
//! to subscribers. Actual network traffic is still gated by the cache's
//! freshness window, so a short poll interval does not hammer the upstream.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::TokenQuote;
use crate::prices::cache::CachedPriceFeed;

pub struct PriceTicker {
    handle: JoinHandle<()>,
    shutdown: CancellationToken,
    updates: broadcast::Sender<Vec<TokenQuote>>,
}

impl PriceTicker {
    /// Start polling `feed` every `poll_interval`.
    pub fn spawn(feed: CachedPriceFeed, poll_interval: Duration) -> Self {
        let (updates, _) = broadcast::channel(8);
        let shutdown = CancellationToken::new();

        let tx = updates.clone();
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Price ticker shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        match feed.quotes().await {
                            Ok(quotes) => {
                                // No receivers is fine; the next subscriber
                                // catches the next tick.
                                let _ = tx.send(quotes);
                            }
                            Err(e) => warn!("Price refresh failed: {}", e),
                        }
                    }
                }
            }
        });

        info!(
            "Price ticker started with poll interval {} seconds",
            poll_interval.as_secs()
        );

        Self {
            handle,
            shutdown,
            updates,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Vec<TokenQuote>> {
        self.updates.subscribe()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        let _ = self.handle.await;
    }
}
