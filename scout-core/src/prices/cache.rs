//! Timestamp-gated cache for the featured-token quotes.
//!
//! The envelope on disk is `{ "timestamp": <unix millis>, "data": [...] }`.
//! A read within the freshness window short-circuits; anything else refetches
//! and rewrites. Last write wins; writes only happen after a successful
//! fetch, so there is nothing to lock.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ensure_cache_dir;
use crate::error::{ScoutError, ScoutResult};
use crate::models::TokenQuote;
use crate::prices::client::PriceClient;

/// File name of the quote cache inside the platform cache dir.
pub const CACHE_FILE_NAME: &str = "widget-prices-cache.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    timestamp: i64,
    data: Vec<TokenQuote>,
}

pub struct PriceCache {
    path: PathBuf,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Cache at the default location in the platform cache dir.
    pub fn in_cache_dir(ttl: Duration) -> ScoutResult<Self> {
        let dir = ensure_cache_dir()?;
        Ok(Self::new(dir.join(CACHE_FILE_NAME), ttl))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_envelope(&self) -> Option<CacheEnvelope> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                warn!(path = %self.path.display(), "Discarding corrupt price cache: {}", e);
                None
            }
        }
    }

    /// Cached quotes still inside the freshness window.
    pub fn read_fresh(&self) -> Option<Vec<TokenQuote>> {
        let envelope = self.read_envelope()?;
        let age_ms = Utc::now().timestamp_millis() - envelope.timestamp;
        if age_ms >= 0 && (age_ms as u128) < self.ttl.as_millis() {
            Some(envelope.data)
        } else {
            None
        }
    }

    /// Cached quotes regardless of age. Fallback for failed refreshes.
    pub fn read_any(&self) -> Option<Vec<TokenQuote>> {
        self.read_envelope().map(|envelope| envelope.data)
    }

    pub fn write(&self, quotes: &[TokenQuote]) -> ScoutResult<()> {
        let envelope = CacheEnvelope {
            timestamp: Utc::now().timestamp_millis(),
            data: quotes.to_vec(),
        };
        let raw = serde_json::to_string(&envelope)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| ScoutError::PriceCacheError(format!("write failed: {}", e)))?;
        Ok(())
    }
}

/// Read-through price feed: fresh cache hit, else fetch and rewrite, else
/// stale fallback.
pub struct CachedPriceFeed {
    client: PriceClient,
    cache: PriceCache,
}

impl CachedPriceFeed {
    pub fn new(client: PriceClient, cache: PriceCache) -> Self {
        Self { client, cache }
    }

    pub async fn quotes(&self) -> ScoutResult<Vec<TokenQuote>> {
        if let Some(fresh) = self.cache.read_fresh() {
            debug!("Using cached price data");
            return Ok(fresh);
        }

        match self.client.selected().await {
            Ok(quotes) => {
                if let Err(e) = self.cache.write(&quotes) {
                    warn!("Failed to persist price cache: {}", e);
                }
                debug!("Fresh price data fetched and cached");
                Ok(quotes)
            }
            Err(e) => {
                if let Some(stale) = self.cache.read_any() {
                    warn!("Price refresh failed, serving stale data: {}", e);
                    Ok(stale)
                } else {
                    Err(e)
                }
            }
        }
    }
}
