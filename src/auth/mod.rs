/*
[INPUT]:  Account credentials and login responses
[OUTPUT]: Authenticated client with a stored bearer token
[POS]:    Auth layer - login flow over the RPC client
[UPDATE]: When auth endpoints or the token contract change
*/

pub mod token;

pub use token::{TokenData, TokenManager};

use tracing::debug;

use crate::http::{AvtocodClient, AvtocodError, ClientConfig, Result};
use crate::types::{LoginData, LoginRequest};

impl AvtocodClient {
    /// Log in with email and password and store the returned token.
    ///
    /// RPC: `auth.login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AvtocodError::Validation {
                message: "email and password must not be empty".to_string(),
            });
        }

        let params = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let data: LoginData = self.invoke("auth.login", params).await?;

        self.token_manager()
            .set_token(data.token.clone(), data.expires_in, Some(email.to_string()));
        debug!("login succeeded, token stored");
        Ok(data)
    }

    /// Create a client and log in with it in one step
    pub async fn from_credentials(email: &str, password: &str) -> Result<Self> {
        Self::from_credentials_with_config(email, password, ClientConfig::default()).await
    }

    /// Create a client with custom configuration and log in with it
    pub async fn from_credentials_with_config(
        email: &str,
        password: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = Self::with_config(config)?;
        client.login(email, password).await?;
        Ok(client)
    }

    /// Drop the stored token. Purely client-side.
    pub fn logout(&self) {
        self.token_manager().clear();
    }
}
