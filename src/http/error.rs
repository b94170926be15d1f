/*
[INPUT]:  Error sources (HTTP, API error envelopes, serialization, auth)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or extending the RPC code mapping
*/

use thiserror::Error;

/// Main error type for the Avtocod client
#[derive(Error, Debug)]
pub enum AvtocodError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// API returned an error envelope with no dedicated variant
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// No token stored, or the server rejected the token
    #[error("authorization required")]
    Unauthorized,

    /// Stored token is past its expiration instant
    #[error("token expired, please re-authenticate")]
    TokenExpired,

    /// Account is blocked on the server side
    #[error("account is banned: {message}")]
    AccountBanned { message: String },

    /// No active subscription covers the requested product
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// Report uuid does not exist for this account
    #[error("report not found")]
    ReportNotFound,

    /// Report quota for the subscription is exhausted
    #[error("not enough balance to generate the report")]
    NotEnoughBalance,

    /// The query matched no vehicle in any source
    #[error("could not find vehicle for the given query")]
    CouldNotFindVehicle,

    /// Request parameters rejected, locally or by the server
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response was not a JSON-RPC envelope
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AvtocodError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AvtocodError::Http(_) | AvtocodError::Timeout { .. } | AvtocodError::InvalidResponse(_)
        )
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            AvtocodError::Timeout { .. } => Some(1),
            AvtocodError::Http(_) | AvtocodError::InvalidResponse(_) => Some(5),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AvtocodError::Unauthorized
                | AvtocodError::TokenExpired
                | AvtocodError::AccountBanned { .. }
        )
    }

    /// Map a JSON-RPC error envelope to a typed error.
    ///
    /// Standard JSON-RPC codes and the known Profi domain codes get
    /// dedicated variants; anything else falls back to `Api`.
    pub fn from_rpc(code: i64, message: String) -> Self {
        match code {
            -32700 | -32600 | -32602 => AvtocodError::Validation { message },
            40101 | 40102 => AvtocodError::Unauthorized,
            40103 => AvtocodError::AccountBanned { message },
            40201 => AvtocodError::NotEnoughBalance,
            40202 => AvtocodError::SubscriptionNotFound,
            40401 => AvtocodError::ReportNotFound,
            40402 => AvtocodError::CouldNotFindVehicle,
            _ => AvtocodError::Api { code, message },
        }
    }
}

/// Result type alias for Avtocod operations
pub type Result<T> = std::result::Result<T, AvtocodError>;
