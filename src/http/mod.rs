//! HTTP pieces: the outbound fetch, the body preview and the invocation result.

mod fetch;
pub mod preview;
mod response;

pub use fetch::{Fetch, FetchError, Fetched, HttpFetcher};
pub use response::{InvocationResult, StatusCode};
