//! Function trait and invocation context.

use crate::http::InvocationResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Execution context for one invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Environment variables available to the function.
    pub env: HashMap<String, String>,
    /// Function name.
    pub function_name: String,
    /// Request ID for tracing.
    pub request_id: String,
}

impl InvocationContext {
    /// Create a new invocation context.
    pub fn new(function_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            env: HashMap::new(),
            function_name: function_name.into(),
            request_id: request_id.into(),
        }
    }

    /// Create a context carrying the current process environment.
    pub fn from_process_env(
        function_name: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        let mut ctx = Self::new(function_name, request_id);
        ctx.env = std::env::vars().collect();
        ctx
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Get an environment variable.
    pub fn get_env(&self, key: &str) -> Option<&String> {
        self.env.get(key)
    }
}

/// A serverless function invoked by a host with an event and a context.
///
/// `invoke` cannot fail: every failure is folded into the returned
/// [`InvocationResult`].
#[async_trait]
pub trait Function: Send + Sync {
    /// Handle one invocation.
    async fn invoke(&self, event: Value, ctx: &InvocationContext) -> InvocationResult;

    /// Get the function name.
    fn name(&self) -> &str;
}
