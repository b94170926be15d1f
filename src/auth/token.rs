/*
[INPUT]:  API tokens and optional expiration offsets
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

/// Stored token data with metadata
#[derive(Debug, Clone)]
pub struct TokenData {
    pub token: String,
    /// `None` when the login response carried no lifetime; such tokens
    /// are never refused locally.
    pub expires_at: Option<DateTime<Utc>>,
    pub email: Option<String>,
}

impl TokenData {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => false,
        }
    }
}

/// Thread-safe API token manager
#[derive(Debug, Clone)]
pub struct TokenManager {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenManager {
    /// Create a new empty token manager
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a new token, optionally with a lifetime in seconds
    pub fn set_token(&self, token: String, expires_in: Option<u64>, email: Option<String>) {
        let expires_at = expires_in.map(|seconds| Utc::now() + Duration::seconds(seconds as i64));
        let token_data = TokenData {
            token,
            expires_at,
            email,
        };

        let mut guard = self.data.write().unwrap();
        *guard = Some(token_data);
    }

    /// Get the current token if available
    pub fn token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard.as_ref().map(|data| data.token.clone())
    }

    /// Check if no usable token is stored
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap();
        match guard.as_ref() {
            Some(data) => data.is_expired(),
            None => true,
        }
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap();
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}
