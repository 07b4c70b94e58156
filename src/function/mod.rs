//! The call-endpoint function and the trait hosts use to invoke it.

pub mod endpoint;
pub mod error;
pub mod handler;

pub use endpoint::{CallEndpointFunction, EndpointConfig, EndpointInvoker, TARGET_ENDPOINT_VAR};
pub use error::InvokeError;
pub use handler::{Function, InvocationContext};
