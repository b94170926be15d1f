/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Avtocod client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{TokenData, TokenManager};

// Re-export commonly used types from http
pub use http::{
    AvtocodClient,
    AvtocodError,
    ClientConfig,
    Result,
    RpcCall,
};

// Re-export all types
pub use types::*;
