use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use serde_json::value::RawValue;

use crate::adapters::AdapterRegistry;
use crate::config::AdapterConfig;
use crate::kernel::Kernel;
use crate::models::AdapterError;

/// Everything an invocation needs, built once at cold start.
pub struct Bridge {
    config: AdapterConfig,
    kernel: Box<dyn Kernel>,
    adapters: AdapterRegistry,
}

impl Bridge {
    /// Creates a bridge with the default adapters (API Gateway, then load balancer).
    pub fn new(config: AdapterConfig, kernel: impl Kernel + 'static) -> Self {
        Self {
            config,
            kernel: Box::new(kernel),
            adapters: AdapterRegistry::default(),
        }
    }

    /// Translates one gateway payload into the gateway response JSON text.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if no adapter matches or any stage fails.
    pub async fn handle(&self, payload: Value) -> Result<String, AdapterError> {
        self.adapters
            .handle(payload, &*self.kernel, &self.config)
            .await
    }
}

fn to_diagnostic(err: &AdapterError) -> Diagnostic {
    Diagnostic {
        error_type: err.error_type().to_string(),
        error_message: format!("{err:#}"),
    }
}

/// Lambda event handler. Logs the full event when `RUST_LOG=debug`.
///
/// The response JSON is returned as a raw value so the runtime passes the
/// gateway payload through without re-encoding it.
///
/// # Errors
///
/// Returns a `Diagnostic` error with one of the following types:
///
/// - `NoMatchingAdapter`: The event is not an HTTP gateway event
/// - `InvalidEvent`: The event looked like a gateway event but failed to parse
/// - `BodyDecodeError`: The body was flagged as base64 but could not be decoded
/// - `KernelError`: The application kernel failed to handle the request
/// - `SerializationError`: The response could not be encoded as gateway JSON
pub async fn function_handler(
    event: LambdaEvent<Value>,
    bridge: &Bridge,
) -> Result<Box<RawValue>, Diagnostic> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, payload = ?payload, "Received gateway event");

    let json = bridge.handle(payload).await.map_err(|e| {
        error!(error_type = e.error_type(), error = %format!("{e:#}"), "Gateway event failed");
        to_diagnostic(&e)
    })?;

    info!(request_id = %context.request_id, "Gateway event handled");

    RawValue::from_string(json).map_err(|e| {
        error!(error = %e, "Failed to wrap gateway response");
        to_diagnostic(&AdapterError::Serialization(e))
    })
}
