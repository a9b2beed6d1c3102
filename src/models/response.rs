use serde::Serialize;

use crate::http::HeaderBag;

/// Response payload returned to the gateway.
///
/// Field order is the serialized key order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub body: String,
    pub is_base64_encoded: bool,
    pub multi_value_headers: HeaderBag,
    pub status_code: u16,
    /// Only load-balancer targets report this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}
