use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static metadata for a token on the Sonic chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

impl TokenInfo {
    pub fn new(
        address: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            logo_uri: None,
        }
    }
}

/// A featured token paired with its current USD price, as shown in the
/// sidebar market widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenQuote {
    #[serde(flatten)]
    pub token: TokenInfo,
    /// Missing when the price service knows the token but has no quote.
    pub price_usd: Option<f64>,
}

impl TokenQuote {
    /// Price rendered for display, `"N/A"` when unknown.
    pub fn price_label(&self) -> String {
        match self.price_usd {
            Some(price) => format!("{:.4}", price),
            None => "N/A".to_string(),
        }
    }
}

/// One coin entry of the current-prices endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPrice {
    pub symbol: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Envelope of the current-prices endpoint: `{ "coins": { key -> coin } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesEnvelope {
    #[serde(default)]
    pub coins: HashMap<String, CoinPrice>,
}

/// One point of the chart endpoint. The upstream emits either `priceUsd` or
/// `close` for the closing price depending on the pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: i64,
    #[serde(rename = "priceUsd", alias = "close")]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub open: Option<f64>,
}

/// Envelope of the chart endpoint: `{ "chart": [point, ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub chart: Vec<ChartPoint>,
}

/// Time unit for chart requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartUnit {
    #[default]
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl ChartUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartUnit::Hour => "h",
            ChartUnit::Day => "d",
            ChartUnit::Week => "w",
            ChartUnit::Month => "m",
            ChartUnit::Year => "y",
        }
    }
}

impl std::fmt::Display for ChartUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChartUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(ChartUnit::Hour),
            "d" => Ok(ChartUnit::Day),
            "w" => Ok(ChartUnit::Week),
            "m" => Ok(ChartUnit::Month),
            "y" => Ok(ChartUnit::Year),
            other => Err(format!("unknown chart unit '{}'", other)),
        }
    }
}

/// The featured tokens shown in the market widget.
pub fn featured_tokens() -> Vec<TokenInfo> {
    vec![
        TokenInfo::new(
            "0x0e0Ce4D450c705F8a0B6Dd9d5123e3df2787D16B",
            "SONIC",
            "Sonic",
            18,
        ),
        TokenInfo::new(
            "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38",
            "wS",
            "Wrapped Sonic",
            18,
        ),
        TokenInfo::new(
            "0x50c42dEAcD8Fc9773493ED674b675bE577f2634b",
            "WETH",
            "Wrapped Ether",
            18,
        ),
        TokenInfo::new(
            "0x851feE47C6588506277c439A7526aE58cD1d15e5",
            "ODIN",
            "Odin",
            18,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_tokens_have_unique_addresses() {
        let tokens = featured_tokens();
        assert!(!tokens.is_empty());

        let mut addresses: Vec<&str> = tokens.iter().map(|t| t.address.as_str()).collect();
        addresses.sort_unstable();
        addresses.dedup();
        assert_eq!(addresses.len(), tokens.len());
    }

    #[test]
    fn test_price_label() {
        let token = TokenInfo::new("0xabc", "wS", "Wrapped Sonic", 18);
        let quote = TokenQuote {
            token: token.clone(),
            price_usd: Some(0.87129),
        };
        assert_eq!(quote.price_label(), "0.8713");

        let quote = TokenQuote {
            token,
            price_usd: None,
        };
        assert_eq!(quote.price_label(), "N/A");
    }

    #[test]
    fn test_chart_point_accepts_close_alias() {
        let json = r#"{"date": 1700000000, "close": 1.25, "high": 1.3, "low": 1.2, "open": 1.22}"#;
        let point: ChartPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.price_usd, Some(1.25));

        let json = r#"{"date": 1700000000, "priceUsd": 2.5}"#;
        let point: ChartPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.price_usd, Some(2.5));
        assert!(point.high.is_none());
    }

    #[test]
    fn test_chart_unit_round_trip() {
        for unit in [
            ChartUnit::Hour,
            ChartUnit::Day,
            ChartUnit::Week,
            ChartUnit::Month,
            ChartUnit::Year,
        ] {
            let parsed: ChartUnit = unit.as_str().parse().unwrap();
            assert_eq!(parsed, unit);
        }
        assert!("x".parse::<ChartUnit>().is_err());
    }

    #[test]
    fn test_prices_envelope_deserializes() {
        let json = r#"{"coins": {"sonic:0xabc": {"symbol": "wS", "price": 0.91}}}"#;
        let envelope: PricesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.coins.len(), 1);
        assert_eq!(envelope.coins["sonic:0xabc"].symbol, "wS");
        assert_eq!(envelope.coins["sonic:0xabc"].price, Some(0.91));
    }
}
