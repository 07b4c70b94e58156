//! # call-endpoint
//!
//! A serverless function that performs one HTTP GET against the URL found in
//! `TARGET_ENDPOINT` and returns a `{statusCode, body}` summary of what came
//! back.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Host runtime                 │   serverless platform, or the local
//! │ (event, context)             │   HostServer / one-shot binary
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │ CallEndpointFunction         │   resolves EndpointConfig from context
//! │   └─ EndpointInvoker<F>      │
//! │        └─ F: Fetch           │   HttpFetcher (reqwest) in production
//! └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use call_endpoint::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let function = CallEndpointFunction::new();
//!     let ctx = InvocationContext::new("call-endpoint", "req-1")
//!         .with_env(TARGET_ENDPOINT_VAR, "http://example.com");
//!
//!     let result = function.invoke(serde_json::Value::Null, &ctx).await;
//!     println!("{} {}", result.status_code.0, result.body);
//! }
//! ```
//!
//! Every invocation returns a well-formed [`InvocationResult`]; failures are
//! reported through the result, never propagated to the host.

pub mod function;
pub mod http;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::function::{
        CallEndpointFunction, EndpointConfig, EndpointInvoker, Function, InvocationContext,
        InvokeError, TARGET_ENDPOINT_VAR,
    };
    pub use crate::http::{Fetch, FetchError, Fetched, HttpFetcher, InvocationResult, StatusCode};
    pub use crate::runtime::{HostConfig, HostServer};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use function::{CallEndpointFunction, EndpointInvoker, Function, InvocationContext, InvokeError};
pub use http::{InvocationResult, StatusCode};
pub use runtime::{HostConfig, HostServer};
