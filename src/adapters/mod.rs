//! Event adapters translating gateway payloads to kernel requests and back.
//!
//! Each adapter recognizes one trigger shape. The [`AdapterRegistry`] asks
//! them in order and the first one that recognizes the payload handles it.

mod api_gateway;
mod load_balancer;

pub use api_gateway::ApiGatewayAdapter;
pub use load_balancer::LoadBalancerAdapter;

use lambda_runtime::tracing::debug;
use serde_json::Value;

use crate::config::AdapterConfig;
use crate::http::{InternalRequest, InternalResponse};
use crate::kernel::{Kernel, dispatch};
use crate::models::{AdapterError, GatewayEvent, GatewayResponse};
use crate::utils::{decode_body, prepare_url, transform_headers_to_server_vars};

/// Top-level keys every HTTP gateway event carries besides `requestContext`.
const REQUIRED_KEYS: [&str; 3] = ["body", "path", "headers"];

/// One trigger shape the bridge understands.
pub trait EventAdapter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this adapter should handle `payload`. Never fails.
    fn can_handle(&self, payload: &Value) -> bool;

    /// Builds the kernel request for a recognized event.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::BodyDecode`] if the body claims to be base64
    /// but is not.
    fn create_request(
        &self,
        event: GatewayEvent,
        base_url: &str,
    ) -> Result<InternalRequest, AdapterError>;

    /// Serializes the kernel response into the JSON text the trigger expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not UTF-8 or JSON encoding fails.
    fn prepare_response(&self, response: &InternalResponse) -> Result<String, AdapterError>;
}

/// Runs one payload through `adapter`: build, dispatch, serialize.
///
/// # Errors
///
/// Returns the first failure of any stage; nothing is serialized after a
/// failure.
pub async fn handle(
    adapter: &dyn EventAdapter,
    payload: Value,
    kernel: &dyn Kernel,
    config: &AdapterConfig,
) -> Result<String, AdapterError> {
    let event: GatewayEvent =
        serde_json::from_value(payload).map_err(AdapterError::InvalidEvent)?;
    let request = adapter.create_request(event, &config.base_url)?;
    debug!(
        adapter = adapter.name(),
        method = %request.method,
        url = %request.url,
        "Dispatching request to kernel"
    );
    let response = dispatch(kernel, request).await?;
    adapter.prepare_response(&response)
}

/// Ordered list of candidate adapters, selected by first match.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn EventAdapter>>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new(adapters: Vec<Box<dyn EventAdapter>>) -> Self {
        Self { adapters }
    }

    /// Returns the first adapter that recognizes `payload`.
    #[must_use]
    pub fn select(&self, payload: &Value) -> Option<&dyn EventAdapter> {
        self.adapters
            .iter()
            .map(|adapter| &**adapter)
            .find(|adapter| adapter.can_handle(payload))
    }

    /// Selects an adapter for `payload` and runs it.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NoMatchingAdapter`] when no adapter recognizes
    /// the payload, or the selected adapter's error.
    pub async fn handle(
        &self,
        payload: Value,
        kernel: &dyn Kernel,
        config: &AdapterConfig,
    ) -> Result<String, AdapterError> {
        let adapter = self
            .select(&payload)
            .ok_or(AdapterError::NoMatchingAdapter)?;
        debug!(adapter = adapter.name(), "Selected event adapter");
        handle(adapter, payload, kernel, config).await
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ApiGatewayAdapter),
            Box::new(LoadBalancerAdapter),
        ])
    }
}

/// Returns `requestContext` if `payload` has the HTTP gateway event shape.
fn request_context(payload: &Value) -> Option<&Value> {
    let object = payload.as_object()?;
    if REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
        object.get("requestContext")
    } else {
        None
    }
}

/// Whether the request context identifies a load balancer trigger.
fn is_load_balancer(context: &Value) -> bool {
    context.get("elb").is_some()
}

/// Request building shared by every HTTP gateway shape.
fn build_request(event: GatewayEvent, base_url: &str) -> Result<InternalRequest, AdapterError> {
    let body = decode_body(event.body.as_deref().unwrap_or_default(), event.is_base64_encoded)?;
    let server = event
        .headers
        .as_ref()
        .map(|headers| transform_headers_to_server_vars(headers.iter()))
        .unwrap_or_default();

    Ok(InternalRequest {
        url: prepare_url(base_url, &event.path),
        method: event.http_method,
        query: event.query_string_parameters.unwrap_or_default(),
        server,
        body,
    })
}

/// Response serialization shared by every HTTP gateway shape.
fn serialize_response(
    response: &InternalResponse,
    status_description: Option<String>,
) -> Result<String, AdapterError> {
    let payload = GatewayResponse {
        body: String::from_utf8(response.body.clone())?,
        is_base64_encoded: false,
        multi_value_headers: response.headers.clone(),
        status_code: response.status,
        status_description,
    };
    serde_json::to_string(&payload).map_err(AdapterError::Serialization)
}
