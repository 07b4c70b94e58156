//! Local host server that turns HTTP requests into invocations.

use crate::function::{Function, InvocationContext};
use crate::http::{InvocationResult, StatusCode};
use crate::runtime::HostConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Path that triggers an invocation.
pub const INVOKE_PATH: &str = "/invoke";

/// Path of the health check.
pub const HEALTH_PATH: &str = "/_health";

/// Host server.
///
/// Each request on [`INVOKE_PATH`] becomes one invocation of the hosted
/// function. The request body, if any, is the JSON event.
pub struct HostServer {
    /// Server configuration.
    config: HostConfig,
    /// The hosted function.
    function: Arc<dyn Function>,
}

impl HostServer {
    /// Create a new host server.
    pub fn new(config: HostConfig, function: Arc<dyn Function>) -> Self {
        Self { config, function }
    }

    /// Bind the configured address and serve until an I/O error occurs.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            "Host listening on {} for function '{}'",
            listener.local_addr()?,
            self.function.name()
        );

        let function = self.function.clone();
        let config = Arc::new(self.config);

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let function = function.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let function = function.clone();
                    let config = config.clone();
                    async move { handle_request(req, function, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    function: Arc<dyn Function>,
    config: Arc<HostConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        method, path, remote_addr, request_id
    );

    if config.enable_health && path == HEALTH_PATH {
        return Ok(text_response(StatusCode::OK, "OK"));
    }

    if path != INVOKE_PATH {
        return Ok(text_response(StatusCode::NOT_FOUND, "Not found"));
    }

    if method != Method::GET && method != Method::POST {
        return Ok(text_response(StatusCode::NOT_FOUND, "Not found"));
    }

    let event = match read_event(req.into_body(), config.max_body_size).await {
        Ok(event) => event,
        Err(e) => {
            warn!("Rejected event [{}]: {}", request_id, e);
            return Ok(text_response(StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    let ctx = InvocationContext {
        env: config.env.clone(),
        function_name: function.name().to_string(),
        request_id,
    };

    let result = function.invoke(event, &ctx).await;
    Ok(result_response(&result))
}

/// Read the request body as a JSON event; an empty body is `null`.
///
/// Reading stops as soon as the body exceeds `max_body_size`.
async fn read_event<B>(
    body: B,
    max_body_size: usize,
) -> Result<Value, Box<dyn std::error::Error + Send + Sync>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body_bytes = match Limited::new(body, max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => return Err("Event body too large".into()),
        Err(e) => return Err(e),
    };
    if body_bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body_bytes)?)
}

/// Build the HTTP response carrying an invocation result.
fn result_response(result: &InvocationResult) -> Response<Full<Bytes>> {
    let body = match result.to_json() {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, "Serialization error");
        }
    };
    build_response(result.status_code, "application/json", Bytes::from(body))
}

fn text_response(status: StatusCode, message: impl Into<String>) -> Response<Full<Bytes>> {
    build_response(status, "text/plain", Bytes::from(message.into()))
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(status.0).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            status.0
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_str(content_type)
            .unwrap_or(hyper::header::HeaderValue::from_static("text/plain")),
    );
    response
}

/// Generate a unique request ID.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{:x}", timestamp)
}
