//! Invocation result handed back to the host runtime.

use serde::{Deserialize, Serialize};

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
}

/// Result of one invocation.
///
/// Serializes to exactly two keys, `statusCode` and `body`, which is the
/// shape serverless hosts expect from a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Status code of the invocation (not the remote endpoint's status).
    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,
    /// Human-readable summary.
    pub body: String,
}

impl InvocationResult {
    /// Create a new result.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status_code: status,
            body: body.into(),
        }
    }

    /// Create a 200 result.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Create a 500 result.
    pub fn error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    /// Serialize to the JSON document returned to hosts.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_result_serializes_two_keys() {
        let result = InvocationResult::ok("GET http://a -> 200; body_preview=x");
        let value: Value = serde_json::from_slice(&result.to_json().unwrap()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert_eq!(obj["statusCode"], 200);
        assert_eq!(obj["body"], "GET http://a -> 200; body_preview=x");
    }

    #[test]
    fn test_result_deserializes() {
        let result: InvocationResult =
            serde_json::from_str(r#"{"statusCode":500,"body":"boom"}"#).unwrap();
        assert_eq!(result, InvocationResult::error("boom"));
    }

    #[test]
    fn test_result_constructors() {
        assert_eq!(InvocationResult::ok("a").status_code, StatusCode::OK);
        assert_eq!(
            InvocationResult::error("b").status_code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
