//! Invocation errors.

use crate::http::{FetchError, InvocationResult};

/// Message reported when `TARGET_ENDPOINT` is not set.
pub const MISSING_CONFIGURATION_MESSAGE: &str = "TARGET_ENDPOINT não configurado";

/// Why an invocation did not produce a success result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The target endpoint is absent or empty. No request was made.
    MissingConfiguration,
    /// The request to `endpoint` failed or its body could not be read.
    Request {
        endpoint: String,
        source: FetchError,
    },
}

impl InvokeError {
    /// Create a request error.
    pub fn request(endpoint: impl Into<String>, source: FetchError) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::MissingConfiguration => write!(f, "{}", MISSING_CONFIGURATION_MESSAGE),
            InvokeError::Request { endpoint, source } => {
                write!(f, "Erro ao chamar {}: {}", endpoint, source)
            }
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::MissingConfiguration => None,
            InvokeError::Request { source, .. } => Some(source),
        }
    }
}

impl From<InvokeError> for InvocationResult {
    fn from(err: InvokeError) -> Self {
        InvocationResult::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;

    #[test]
    fn test_missing_configuration_result() {
        let result: InvocationResult = InvokeError::MissingConfiguration.into();
        assert_eq!(result.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(result.body, "TARGET_ENDPOINT não configurado");
    }

    #[test]
    fn test_request_error_result() {
        let err = InvokeError::request("http://invalid.invalid", FetchError::new("dns failure"));
        let result: InvocationResult = err.into();
        assert_eq!(result.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(result.body, "Erro ao chamar http://invalid.invalid: dns failure");
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let err = InvokeError::request("http://a", FetchError::new("x"));
        assert!(err.source().is_some());
        assert!(InvokeError::MissingConfiguration.source().is_none());
    }
}
