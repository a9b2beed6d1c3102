use reqwest::StatusCode;
use serde_json::Value;

use super::{EventAdapter, build_request, is_load_balancer, request_context, serialize_response};
use crate::http::{InternalRequest, InternalResponse};
use crate::models::{AdapterError, GatewayEvent};
use crate::utils::decode_query;

/// Adapter for Application Load Balancer target events.
///
/// Requests map like API Gateway ones, except that the load balancer passes
/// query parameters through still percent-encoded, so they are decoded here.
/// Responses also need a `statusDescription`, which the load balancer uses as
/// the status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadBalancerAdapter;

/// Formats the status line text, e.g. `200 OK`.
fn status_description(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| status.to_string(), |reason| format!("{status} {reason}"))
}

impl EventAdapter for LoadBalancerAdapter {
    fn name(&self) -> &'static str {
        "load-balancer"
    }

    fn can_handle(&self, payload: &Value) -> bool {
        request_context(payload).is_some_and(is_load_balancer)
    }

    fn create_request(
        &self,
        event: GatewayEvent,
        base_url: &str,
    ) -> Result<InternalRequest, AdapterError> {
        let mut request = build_request(event, base_url)?;
        request.query = decode_query(request.query).map_err(AdapterError::QueryDecode)?;
        Ok(request)
    }

    fn prepare_response(&self, response: &InternalResponse) -> Result<String, AdapterError> {
        serialize_response(response, Some(status_description(response.status)))
    }
}
