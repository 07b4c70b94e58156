//! Local host runtime for the call-endpoint function.

mod config;
mod server;

pub use config::{HostConfig, HOST_VAR, PORT_VAR};
pub use server::{generate_request_id, HostServer, HEALTH_PATH, INVOKE_PATH};
