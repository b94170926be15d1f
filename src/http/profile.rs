/*
[INPUT]:  Stored bearer token
[OUTPUT]: Account data (balance per product, profile info)
[POS]:    HTTP layer - profile endpoints (require auth)
[UPDATE]: When adding new profile endpoints
*/

use serde_json::json;

use crate::http::{AvtocodClient, Result};
use crate::types::{Account, BalanceItem, BalanceResponse};

impl AvtocodClient {
    /// Remaining report quota per subscription product.
    ///
    /// RPC: `profile.balance`
    pub async fn get_balance(&self) -> Result<Vec<BalanceItem>> {
        let response: BalanceResponse = self.invoke_authed("profile.balance", json!({})).await?;
        Ok(response.0)
    }

    /// Account profile of the logged-in user.
    ///
    /// RPC: `profile.info`
    pub async fn get_account_info(&self) -> Result<Account> {
        self.invoke_authed("profile.info", json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::{AvtocodClient, ClientConfig};

    fn authed_client(server: &MockServer) -> AvtocodClient {
        let api_url = format!("{}/rpc", server.uri());
        let client = AvtocodClient::with_config_and_api_url(ClientConfig::default(), &api_url)
            .expect("client init");
        client.token_manager().set_token("token".into(), None, None);
        client
    }

    #[tokio::test]
    async fn test_get_balance() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({"method": "profile.balance"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": [
                    {"product_uuid": "1b8e3a42-5c7e-4c3b-9f61-2f8a33c21f10", "count": 42},
                    {"product_uuid": "7d0f7e9c-0b8b-4f6d-8a3f-5f3f2a1b9c8d", "count": 0},
                ],
            })))
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let balance = client.get_balance().await.expect("get_balance failed");

        assert_eq!(balance.len(), 2);
        assert_eq!(balance[0].count, 42);
        assert_eq!(balance[1].count, 0);
    }

    #[tokio::test]
    async fn test_get_account_info() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({"method": "profile.info"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": "1",
                "result": {
                    "uuid": "9e107d9d-3721-4b1c-8f5a-6b1a2c3d4e5f",
                    "email": "user@example.com",
                    "tariff": "profi",
                    "created_at": "2023-11-20T09:30:00Z",
                },
            })))
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let account = client
            .get_account_info()
            .await
            .expect("get_account_info failed");

        assert_eq!(account.email, "user@example.com");
        assert_eq!(account.tariff.as_deref(), Some("profi"));
        assert!(account.name.is_none());
    }
}
