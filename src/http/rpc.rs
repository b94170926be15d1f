/*
[INPUT]:  Method names and serializable params
[OUTPUT]: Decoded JSON-RPC results or typed errors
[POS]:    HTTP layer - JSON-RPC 2.0 envelope handling (single + batch)
[UPDATE]: When the envelope format or batch matching rules change
*/

use std::collections::HashMap;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::http::{AvtocodClient, AvtocodError, Result};

const JSONRPC_VERSION: &str = "2.0";

/// Outgoing JSON-RPC 2.0 envelope
#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: &'a str,
    method: &'a str,
    params: P,
}

/// Error body of a JSON-RPC response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Incoming JSON-RPC 2.0 envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

impl RpcResponse {
    fn into_result(self) -> Result<Value> {
        if let Some(error) = self.error {
            return Err(AvtocodError::from_rpc(error.code, error.message));
        }
        self.result.ok_or_else(|| {
            AvtocodError::InvalidResponse("envelope carries neither result nor error".to_string())
        })
    }
}

/// One call of a batch request
#[derive(Debug, Clone)]
pub struct RpcCall {
    pub method: String,
    pub params: Value,
}

impl RpcCall {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

impl AvtocodClient {
    /// Invoke a method without authentication
    pub(crate) async fn invoke<P, T>(&self, method: &str, params: P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        self.invoke_inner(method, params, None).await
    }

    /// Invoke a method with the stored bearer token
    pub(crate) async fn invoke_authed<P, T>(&self, method: &str, params: P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let token = self.bearer_token()?;
        self.invoke_inner(method, params, Some(token)).await
    }

    async fn invoke_inner<P, T>(&self, method: &str, params: P, token: Option<String>) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let id = new_request_id();
        let envelope = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: id.as_str(),
            method,
            params,
        };
        let body = serde_json::to_value(&envelope)?;

        debug!(method, id = %id, "sending RPC request");
        let value = self.send_rpc(body, token).await?;

        let response: RpcResponse = serde_json::from_value(value)?;
        if let Some(error) = &response.error {
            warn!(method, code = error.code, "API returned error envelope");
        }
        Ok(serde_json::from_value(response.into_result()?)?)
    }

    /// Send several calls as one JSON-RPC batch.
    ///
    /// The outer `Result` covers transport failures; each inner `Result`
    /// is the outcome of one call, in the order the calls were given.
    /// Responses are matched back by envelope id since the server is free
    /// to reorder a batch.
    pub async fn invoke_batch(&self, calls: &[RpcCall]) -> Result<Vec<Result<Value>>> {
        if calls.is_empty() {
            return Err(AvtocodError::Validation {
                message: "batch must contain at least one call".to_string(),
            });
        }

        let token = self.bearer_token()?;
        let ids: Vec<String> = calls.iter().map(|_| new_request_id()).collect();
        let envelopes: Result<Vec<Value>> = calls
            .iter()
            .zip(&ids)
            .map(|(call, id)| {
                let envelope = RpcRequest {
                    jsonrpc: JSONRPC_VERSION,
                    id: id.as_str(),
                    method: call.method.as_str(),
                    params: &call.params,
                };
                Ok(serde_json::to_value(&envelope)?)
            })
            .collect();

        debug!(calls = calls.len(), "sending RPC batch");
        let value = self.send_rpc(Value::Array(envelopes?), Some(token)).await?;
        let responses: Vec<RpcResponse> = serde_json::from_value(value)?;

        // Responses the client never asked for are dropped on the floor.
        let mut by_id: HashMap<String, RpcResponse> = responses
            .into_iter()
            .filter_map(|response| response.id.clone().map(|id| (id, response)))
            .collect();

        Ok(ids
            .iter()
            .map(|id| match by_id.remove(id) {
                Some(response) => response.into_result(),
                None => Err(AvtocodError::InvalidResponse(format!(
                    "no response for request id {id}"
                ))),
            })
            .collect())
    }

    async fn send_rpc(&self, body: Value, token: Option<String>) -> Result<Value> {
        let mut builder = self.http_client().post(self.api_url().clone()).json(&body);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.starts_with("application/json") {
            return Err(AvtocodError::InvalidResponse(format!(
                "non-JSON response ({status}): {content_type:?}"
            )));
        }

        response.json().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> AvtocodError {
        if error.is_timeout() {
            AvtocodError::Timeout {
                duration: self.request_timeout().as_secs(),
            }
        } else {
            AvtocodError::Http(error)
        }
    }
}
