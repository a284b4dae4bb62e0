//! Client for the upstream token price API.
//!
//! The upstream keys tokens as `sonic:{address}`; current prices take a
//! comma-joined list of such keys, charts take a token pair plus a time unit
//! and answer candle points.

use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::PricesConfig;
use crate::error::{ScoutError, ScoutResult};
use crate::models::token::{ChartEnvelope, PricesEnvelope};
use crate::models::{featured_tokens, ChartPoint, ChartUnit, CoinPrice, TokenQuote};

const REQUEST_TIMEOUT_SECS: u64 = 15;

pub struct PriceClient {
    client: Client,
    base_url: String,
    chain_id: u32,
    quote_token: String,
}

impl PriceClient {
    pub fn new(config: &PricesConfig) -> ScoutResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScoutError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chain_id: config.chain_id,
            quote_token: config.quote_token.clone(),
        })
    }

    /// `sonic:{address}` for each address, comma-joined.
    fn format_addresses(addresses: &[&str]) -> String {
        addresses
            .iter()
            .map(|addr| format!("sonic:{}", addr))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Current USD prices for the given token addresses, keyed as returned
    /// by the upstream.
    pub async fn current(&self, addresses: &[&str]) -> ScoutResult<HashMap<String, CoinPrice>> {
        let url = format!(
            "{}/prices/current/{}",
            self.base_url,
            Self::format_addresses(addresses)
        );
        debug!(url = %url, "Fetching current prices");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoutError::PriceRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoutError::PriceRequestFailed(format!(
                "price API returned status {}",
                response.status()
            )));
        }

        let envelope = response
            .json::<PricesEnvelope>()
            .await
            .map_err(|e| ScoutError::PriceParseError(e.to_string()))?;

        Ok(envelope.coins)
    }

    /// Quotes for the featured tokens, matched to the upstream coins by
    /// symbol. Tokens the upstream does not know come back with no price.
    pub async fn selected(&self) -> ScoutResult<Vec<TokenQuote>> {
        let tokens = featured_tokens();
        let addresses: Vec<&str> = tokens.iter().map(|t| t.address.as_str()).collect();
        let coins = self.current(&addresses).await?;

        let quotes = tokens
            .into_iter()
            .map(|token| {
                let price_usd = coins
                    .values()
                    .find(|coin| coin.symbol == token.symbol)
                    .and_then(|coin| coin.price);
                TokenQuote { token, price_usd }
            })
            .collect();

        Ok(quotes)
    }

    /// Hourly-by-default candle chart of `token_a` against the configured
    /// quote token.
    pub async fn chart(
        &self,
        token_a: &str,
        token_b: Option<&str>,
        unit: ChartUnit,
    ) -> ScoutResult<Vec<ChartPoint>> {
        let token_b = token_b.unwrap_or(&self.quote_token);
        let url = format!(
            "{}/prices/chart/{}/{}/{}?unit={}",
            self.base_url, self.chain_id, token_a, token_b, unit
        );
        debug!(url = %url, "Fetching price chart");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoutError::PriceRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoutError::PriceRequestFailed(format!(
                "price chart API returned status {}",
                response.status()
            )));
        }

        let envelope = response
            .json::<ChartEnvelope>()
            .await
            .map_err(|e| ScoutError::PriceParseError(e.to_string()))?;

        Ok(envelope.chart)
    }
}
