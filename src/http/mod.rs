/*
[INPUT]:  HTTP client configuration and RPC endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - JSON-RPC communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod profile;
pub mod report;
pub mod rpc;

pub use client::{AvtocodClient, ClientConfig};
pub use error::{AvtocodError, Result};
pub use rpc::{RpcCall, RpcErrorBody};
