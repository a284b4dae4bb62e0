//! Error types for the Sonic Scout core library.
//!
//! This module provides a unified error handling system for all Scout
//! operations, including configuration, the remote agent API, chat sessions,
//! and the token price service.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Environment, config file, and validation errors |
//! | E2001-E2099 | Agent API | Directory lookup and message delivery errors |
//! | E3001-E3099 | Session | Chat session lifecycle errors |
//! | E4001-E4099 | Prices | Price API and cache errors |
//! | E5001-E5099 | General | Internal, IO, and serialization errors |

use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the Sonic Scout core library.
///
/// Covers all error conditions that can occur while talking to the remote
/// agent, loading configuration, or serving token prices, with enough context
/// for user feedback.
#[derive(Debug, Error)]
pub enum ScoutError {
    // ========================================================================
    // Configuration Errors (E1001-E1099)
    // ========================================================================
    /// Required environment variable is missing
    #[error("[E1001] Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Configuration file parse error
    #[error("[E1002] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value
    #[error("[E1003] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Agent API Errors (E2001-E2099)
    // ========================================================================
    /// Agent directory returned no agents
    #[error("[E2001] No agents available in the directory")]
    NoAgentsAvailable,

    /// Agent API request failed
    #[error("[E2002] Agent API request failed: {0}")]
    AgentRequestFailed(String),

    /// Agent API response could not be parsed
    #[error("[E2003] Failed to parse agent API response: {0}")]
    AgentParseError(String),

    /// Agent API is unreachable
    #[error("[E2004] Agent API unavailable: {0}")]
    AgentUnavailable(String),

    /// Agent API request timed out
    #[error("[E2005] Agent API request timed out after {0} seconds")]
    AgentTimeout(u64),

    // ========================================================================
    // Session Errors (E3001-E3099)
    // ========================================================================
    /// No active agent id and no caller fallback
    #[error("[E3001] No agent selected for this session")]
    NoAgentSelected,

    /// A send is already in flight for this session
    #[error("[E3002] A message send is already in flight")]
    SendInFlight,

    /// The send was cancelled before its reply could be applied
    #[error("[E3003] Send cancelled")]
    SendCancelled,

    // ========================================================================
    // Price Errors (E4001-E4099)
    // ========================================================================
    /// Price API request failed
    #[error("[E4001] Price API request failed: {0}")]
    PriceRequestFailed(String),

    /// Price API response could not be parsed
    #[error("[E4002] Failed to parse price API response: {0}")]
    PriceParseError(String),

    /// Price cache could not be read or written
    #[error("[E4003] Price cache error: {0}")]
    PriceCacheError(String),

    // ========================================================================
    // General Errors (E5001-E5099)
    // ========================================================================
    /// Internal error (catch-all for unexpected conditions)
    #[error("[E5001] Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("[E5002] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E5003] Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for Scout operations.
pub type ScoutResult<T> = Result<T, ScoutError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScoutError::AgentTimeout(30)
        } else if err.is_connect() {
            ScoutError::AgentUnavailable(err.to_string())
        } else if err.is_decode() {
            ScoutError::AgentParseError(err.to_string())
        } else {
            ScoutError::AgentRequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        ScoutError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        ScoutError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for ScoutError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ScoutError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => ScoutError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => ScoutError::ConfigParseError(err.to_string()),
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl ScoutError {
    /// Returns true if this error is related to configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScoutError::MissingEnvVar(_)
                | ScoutError::ConfigParseError(_)
                | ScoutError::InvalidConfigValue { .. }
        )
    }

    /// Returns true if this error came from the remote agent API.
    pub fn is_agent_error(&self) -> bool {
        matches!(
            self,
            ScoutError::NoAgentsAvailable
                | ScoutError::AgentRequestFailed(_)
                | ScoutError::AgentParseError(_)
                | ScoutError::AgentUnavailable(_)
                | ScoutError::AgentTimeout(_)
        )
    }

    /// Returns true if this error is related to the price service.
    pub fn is_price_error(&self) -> bool {
        matches!(
            self,
            ScoutError::PriceRequestFailed(_)
                | ScoutError::PriceParseError(_)
                | ScoutError::PriceCacheError(_)
        )
    }

    /// Returns true if this error is transient and the operation might
    /// succeed if the user tries again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScoutError::AgentUnavailable(_)
                | ScoutError::AgentTimeout(_)
                | ScoutError::SendInFlight
                | ScoutError::PriceRequestFailed(_)
        )
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ScoutError::MissingEnvVar(_) => "E1001",
            ScoutError::ConfigParseError(_) => "E1002",
            ScoutError::InvalidConfigValue { .. } => "E1003",
            ScoutError::NoAgentsAvailable => "E2001",
            ScoutError::AgentRequestFailed(_) => "E2002",
            ScoutError::AgentParseError(_) => "E2003",
            ScoutError::AgentUnavailable(_) => "E2004",
            ScoutError::AgentTimeout(_) => "E2005",
            ScoutError::NoAgentSelected => "E3001",
            ScoutError::SendInFlight => "E3002",
            ScoutError::SendCancelled => "E3003",
            ScoutError::PriceRequestFailed(_) => "E4001",
            ScoutError::PriceParseError(_) => "E4002",
            ScoutError::PriceCacheError(_) => "E4003",
            ScoutError::Internal(_) => "E5001",
            ScoutError::IoError(_) => "E5002",
            ScoutError::SerializationError(_) => "E5003",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            ScoutError::MissingEnvVar(_) => {
                Some("Create a .env file or set the environment variable")
            }
            ScoutError::NoAgentsAvailable => {
                Some("Check that the agent service is running and has at least one agent")
            }
            ScoutError::AgentUnavailable(_) => {
                Some("Check your network connection and the agent API base URL")
            }
            ScoutError::AgentTimeout(_) => {
                Some("The agent is slow to respond. Try again in a moment")
            }
            ScoutError::NoAgentSelected => {
                Some("Wait for agent discovery to complete or pass --agent <id>")
            }
            ScoutError::SendInFlight => {
                Some("Wait for the current reply before sending another message")
            }
            ScoutError::PriceRequestFailed(_) => {
                Some("The price service may be down. Cached data is used when available")
            }
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        if self.is_transient() {
            warn!(
                error_code = %code,
                suggestion = suggestion,
                "Transient error occurred: {}",
                self
            );
        } else {
            error!(
                error_code = %code,
                suggestion = suggestion,
                "Error occurred: {}",
                self
            );
        }
    }
}

// ============================================================================
// User-friendly error formatting for CLI
// ============================================================================

/// Format an error for CLI display with suggestions.
pub struct CliErrorDisplay<'a> {
    error: &'a ScoutError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a ScoutError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Main error message (already includes code)
        writeln!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                writeln!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
