//! The endpoint invoker and the function that exposes it to hosts.

use crate::function::error::InvokeError;
use crate::function::handler::{Function, InvocationContext};
use crate::http::preview::{body_preview, PREVIEW_READ_LIMIT};
use crate::http::{Fetch, HttpFetcher, InvocationResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

/// Environment variable holding the target endpoint URL.
pub const TARGET_ENDPOINT_VAR: &str = "TARGET_ENDPOINT";

/// Name the function registers under.
pub const FUNCTION_NAME: &str = "call-endpoint";

/// Configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// URL to GET. `None` and `Some("")` both mean "not configured".
    pub target_endpoint: Option<String>,
}

impl EndpointConfig {
    /// Create a config pointing at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            target_endpoint: Some(endpoint.into()),
        }
    }

    /// Resolve the config from an invocation context's env map.
    pub fn from_context(ctx: &InvocationContext) -> Self {
        Self {
            target_endpoint: ctx.get_env(TARGET_ENDPOINT_VAR).cloned(),
        }
    }

    /// The configured endpoint, if set and non-empty.
    pub fn endpoint(&self) -> Option<&str> {
        self.target_endpoint.as_deref().filter(|e| !e.is_empty())
    }
}

/// Calls the configured endpoint once and summarizes the response.
#[derive(Debug, Clone, Default)]
pub struct EndpointInvoker<F = HttpFetcher> {
    fetcher: F,
}

impl<F: Fetch> EndpointInvoker<F> {
    /// Create an invoker on top of `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Perform the GET and build the success message.
    pub async fn call(&self, config: &EndpointConfig) -> Result<String, InvokeError> {
        let endpoint = config.endpoint().ok_or(InvokeError::MissingConfiguration)?;

        info!("Calling endpoint: {}", endpoint);

        let fetched = self
            .fetcher
            .fetch_preview(endpoint, PREVIEW_READ_LIMIT)
            .await
            .map_err(|e| InvokeError::request(endpoint, e))?;

        Ok(format!(
            "GET {} -> {}; body_preview={}",
            endpoint,
            fetched.status,
            body_preview(&fetched.head)
        ))
    }

    /// Perform the GET and fold every outcome into a result.
    pub async fn invoke(&self, config: &EndpointConfig) -> InvocationResult {
        match self.call(config).await {
            Ok(message) => InvocationResult::ok(message),
            Err(e) => {
                warn!("Invocation failed: {}", e);
                e.into()
            }
        }
    }
}

/// The function hosts invoke: reads `TARGET_ENDPOINT` from the context and
/// runs the [`EndpointInvoker`]. The event payload is ignored.
pub struct CallEndpointFunction<F = HttpFetcher> {
    invoker: EndpointInvoker<F>,
}

impl CallEndpointFunction<HttpFetcher> {
    /// Create the function with the default HTTP fetcher.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }
}

impl Default for CallEndpointFunction<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetch> CallEndpointFunction<F> {
    /// Create the function on top of a custom fetcher.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            invoker: EndpointInvoker::new(fetcher),
        }
    }
}

#[async_trait]
impl<F: Fetch> Function for CallEndpointFunction<F> {
    async fn invoke(&self, _event: Value, ctx: &InvocationContext) -> InvocationResult {
        let config = EndpointConfig::from_context(ctx);
        let result = self.invoker.invoke(&config).await;
        info!(
            "Function '{}' finished with status {} [{}]",
            ctx.function_name, result.status_code.0, ctx.request_id
        );
        result
    }

    fn name(&self) -> &str {
        FUNCTION_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FetchError, Fetched, StatusCode};
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fetcher returning a canned outcome and counting calls.
    struct StubFetcher {
        outcome: Result<Fetched, FetchError>,
        calls: Arc<AtomicUsize>,
    }

    impl StubFetcher {
        fn ok(status: u16, body: &[u8]) -> Self {
            Self {
                outcome: Ok(Fetched {
                    status,
                    head: Bytes::copy_from_slice(body),
                }),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn err(message: &str) -> Self {
            Self {
                outcome: Err(FetchError::new(message)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch_preview(&self, _endpoint: &str, limit: usize) -> Result<Fetched, FetchError> {
            assert_eq!(limit, PREVIEW_READ_LIMIT);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[test]
    fn test_config_endpoint_filters_empty() {
        assert_eq!(EndpointConfig::default().endpoint(), None);
        assert_eq!(EndpointConfig::new("").endpoint(), None);
        assert_eq!(EndpointConfig::new("http://a").endpoint(), Some("http://a"));
    }

    #[test]
    fn test_config_from_context() {
        let ctx = InvocationContext::new("fn", "req").with_env(TARGET_ENDPOINT_VAR, "http://b");
        assert_eq!(EndpointConfig::from_context(&ctx), EndpointConfig::new("http://b"));

        let empty = InvocationContext::new("fn", "req");
        assert_eq!(EndpointConfig::from_context(&empty).target_endpoint, None);
    }

    #[tokio::test]
    async fn test_missing_config_makes_no_call() {
        let fetcher = StubFetcher::ok(200, b"unused");
        let calls = fetcher.calls.clone();
        let invoker = EndpointInvoker::new(fetcher);

        for config in [EndpointConfig::default(), EndpointConfig::new("")] {
            let result = invoker.invoke(&config).await;
            assert_eq!(result, InvocationResult::error("TARGET_ENDPOINT não configurado"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_message() {
        let fetcher = StubFetcher::ok(200, b"hello world");
        let calls = fetcher.calls.clone();
        let invoker = EndpointInvoker::new(fetcher);

        let result = invoker.invoke(&EndpointConfig::new("http://example.com")).await;

        assert_eq!(result.status_code, StatusCode::OK);
        assert_eq!(
            result.body,
            "GET http://example.com -> 200; body_preview=hello world"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_reports_remote_status() {
        let invoker = EndpointInvoker::new(StubFetcher::ok(204, b""));
        let result = invoker.invoke(&EndpointConfig::new("http://a")).await;

        assert_eq!(result.status_code, StatusCode::OK);
        assert_eq!(result.body, "GET http://a -> 204; body_preview=");
    }

    #[tokio::test]
    async fn test_preview_truncated_to_200_chars() {
        let body = "a".repeat(500);
        let invoker = EndpointInvoker::new(StubFetcher::ok(200, body.as_bytes()));
        let result = invoker.invoke(&EndpointConfig::new("http://a")).await;

        let preview = result.body.split("body_preview=").nth(1).unwrap();
        assert_eq!(preview, "a".repeat(200));
    }

    #[tokio::test]
    async fn test_request_failure() {
        let invoker = EndpointInvoker::new(StubFetcher::err("dns error"));
        let result = invoker.invoke(&EndpointConfig::new("http://invalid.invalid")).await;

        assert_eq!(result.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(result.body, "Erro ao chamar http://invalid.invalid: dns error");
    }

    #[tokio::test]
    async fn test_function_ignores_event() {
        let function = CallEndpointFunction::with_fetcher(StubFetcher::ok(200, b"ok"));
        let ctx = InvocationContext::new("fn", "req").with_env(TARGET_ENDPOINT_VAR, "http://a");

        let a = function.invoke(Value::Null, &ctx).await;
        let b = function
            .invoke(serde_json::json!({"anything": [1, 2, 3]}), &ctx)
            .await;

        assert_eq!(a, b);
        assert_eq!(function.name(), "call-endpoint");
    }
}
