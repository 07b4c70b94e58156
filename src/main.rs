//! call-endpoint binary.
//!
//! ```text
//! call-endpoint [serve]            run the local host
//! call-endpoint invoke [EVENT]     invoke once and print the JSON result
//! ```

use call_endpoint::prelude::*;
use call_endpoint::runtime::generate_request_id;
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: call-endpoint [serve | invoke [EVENT_FILE]]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr so `invoke` keeps stdout for the result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("serve") => serve().await,
        Some("invoke") => invoke_once(args.get(1).map(String::as_str)).await,
        Some(other) => Err(format!("unknown command '{}'\n{}", other, USAGE).into()),
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = HostConfig::from_env()?;
    let function = CallEndpointFunction::new();

    tracing::info!("Starting call-endpoint host on {}", config.bind_addr());
    tracing::info!("Try: curl http://{}/invoke", config.bind_addr());

    HostServer::new(config, Arc::new(function)).run().await
}

async fn invoke_once(
    event_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let event: Value = match event_file {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Value::Null,
    };

    let function = CallEndpointFunction::new();
    let ctx = InvocationContext::from_process_env(function.name(), generate_request_id());

    let result = function.invoke(event, &ctx).await;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
