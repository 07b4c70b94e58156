//! Outbound GET used by the endpoint invoker.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::debug;

/// What came back from the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    /// Final HTTP status, after any redirects the client followed.
    pub status: u16,
    /// Leading bytes of the body, never longer than the requested limit.
    pub head: Bytes,
}

/// Failure while calling the remote endpoint or reading its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    /// Description of the underlying failure.
    pub message: String,
}

impl FetchError {
    /// Create a new FetchError.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a final response outside 2xx.
    ///
    /// Uses the reason phrase the server sent, falling back to the
    /// canonical one when the server sent the standard phrase.
    pub fn http_status(status: reqwest::StatusCode, reason: Option<&str>) -> Self {
        let reason = reason.or(status.canonical_reason()).unwrap_or("");
        Self::new(format!("HTTP Error {}: {}", status.as_u16(), reason))
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::new(err.to_string())
    }
}

/// Network seam between the invoker and the outside world.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue one GET to `endpoint` and return its status with at most
    /// `limit` leading body bytes.
    async fn fetch_preview(&self, endpoint: &str, limit: usize) -> Result<Fetched, FetchError>;
}

/// reqwest-backed fetcher with default client settings.
///
/// Redirects follow the client default (up to 10 hops). Any final status
/// outside 2xx, including a 3xx the client did not follow, is reported as a
/// [`FetchError`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_preview(&self, endpoint: &str, limit: usize) -> Result<Fetched, FetchError> {
        let mut resp = self.client.get(endpoint).send().await?;
        let status = resp.status();

        if !status.is_success() {
            // hyper only records the phrase when it differs from the canonical one
            let reason = resp
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned());
            return Err(FetchError::http_status(status, reason.as_deref()));
        }

        let mut head = BytesMut::with_capacity(limit);
        while head.len() < limit {
            match resp.chunk().await? {
                Some(chunk) => {
                    let take = chunk.len().min(limit - head.len());
                    head.extend_from_slice(&chunk[..take]);
                }
                None => break,
            }
        }

        debug!("GET {} -> {} ({} bytes read)", endpoint, status, head.len());

        Ok(Fetched {
            status: status.as_u16(),
            head: head.freeze(),
        })
    }
}
