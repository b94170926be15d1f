/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for avtocod client tests

use avtocod::{AvtocodClient, ClientConfig};
use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at a mock server's `/rpc` endpoint
pub fn client_for(server: &MockServer) -> AvtocodClient {
    let api_url = format!("{}/rpc", server.uri());
    AvtocodClient::with_config_and_api_url(ClientConfig::default(), &api_url)
        .expect("client init")
}

/// Same, with a bearer token already stored
#[allow(dead_code)]
pub fn authed_client_for(server: &MockServer) -> AvtocodClient {
    let client = client_for(server);
    client
        .token_manager()
        .set_token(mock_api_token(), None, None);
    client
}

/// Token value used by authed test clients
#[allow(dead_code)]
pub fn mock_api_token() -> String {
    "test-api-token".to_string()
}

/// JSON-RPC success envelope
#[allow(dead_code)]
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "1",
        "result": result,
    }))
}

/// JSON-RPC error envelope
#[allow(dead_code)]
pub fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": "1",
        "error": {"code": code, "message": message},
    }))
}
