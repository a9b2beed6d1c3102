use serde_json::Value;

use super::{EventAdapter, build_request, is_load_balancer, request_context, serialize_response};
use crate::http::{InternalRequest, InternalResponse};
use crate::models::{AdapterError, GatewayEvent};

/// Adapter for API Gateway REST proxy events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiGatewayAdapter;

impl EventAdapter for ApiGatewayAdapter {
    fn name(&self) -> &'static str {
        "api-gateway"
    }

    fn can_handle(&self, payload: &Value) -> bool {
        request_context(payload).is_some_and(|context| !is_load_balancer(context))
    }

    fn create_request(
        &self,
        event: GatewayEvent,
        base_url: &str,
    ) -> Result<InternalRequest, AdapterError> {
        build_request(event, base_url)
    }

    fn prepare_response(&self, response: &InternalResponse) -> Result<String, AdapterError> {
        serialize_response(response, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: &Value) -> GatewayEvent {
        serde_json::from_value(value.clone()).unwrap()
    }

    fn sample_payload() -> Value {
        json!({
            "httpMethod": "POST",
            "path": "/foo/bar",
            "headers": {
                "Content-Type": "application/json",
                "X-Custom": "yes"
            },
            "queryStringParameters": {"page": "2"},
            "body": "{\"a\":1}",
            "isBase64Encoded": false,
            "requestContext": {"stage": "prod"}
        })
    }

    #[test]
    fn test_can_handle_truth_table() {
        let adapter = ApiGatewayAdapter;
        let keys = ["body", "path", "headers", "requestContext"];

        // Every subset of the required keys; only the full set is recognized.
        for mask in 0u8..16 {
            let mut payload = serde_json::Map::new();
            for (bit, key) in keys.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    let value = if *key == "requestContext" { json!({}) } else { json!("") };
                    payload.insert((*key).to_string(), value);
                }
            }
            assert_eq!(
                adapter.can_handle(&Value::Object(payload)),
                mask == 0b1111,
                "mask {mask:04b}"
            );
        }
    }

    #[test]
    fn test_can_handle_rejects_load_balancer_events() {
        let mut payload = sample_payload();
        payload["requestContext"] = json!({"elb": {"targetGroupArn": "arn:aws:elasticloadbalancing"}});
        assert!(!ApiGatewayAdapter.can_handle(&payload));
    }

    #[test]
    fn test_can_handle_accepts_null_values() {
        let payload = json!({"body": null, "path": "/", "headers": null, "requestContext": {}});
        assert!(ApiGatewayAdapter.can_handle(&payload));
    }

    #[test]
    fn test_create_request() {
        let request = ApiGatewayAdapter
            .create_request(event(&sample_payload()), "http://example.com")
            .unwrap();

        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "http://example.com/foo/bar");
        assert_eq!(request.query.get("page").map(String::as_str), Some("2"));
        assert_eq!(
            request.server.get("CONTENT_TYPE").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.server.get("HTTP_X_CUSTOM").map(String::as_str), Some("yes"));
        assert_eq!(request.body, b"{\"a\":1}");
    }

    #[test]
    fn test_create_request_root_path() {
        let mut payload = sample_payload();
        payload["path"] = json!("/");
        let request = ApiGatewayAdapter
            .create_request(event(&payload), "http://example.com")
            .unwrap();
        assert_eq!(request.url, "http://example.com");
    }

    #[test]
    fn test_create_request_missing_query_and_body() {
        let mut payload = sample_payload();
        payload["queryStringParameters"] = Value::Null;
        payload["body"] = Value::Null;
        let request = ApiGatewayAdapter
            .create_request(event(&payload), "http://example.com")
            .unwrap();
        assert!(request.query.is_empty());
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_create_request_decodes_base64_body() {
        let mut payload = sample_payload();
        payload["body"] = json!("cGF5bG9hZA==");
        payload["isBase64Encoded"] = json!(true);
        let request = ApiGatewayAdapter
            .create_request(event(&payload), "http://example.com")
            .unwrap();
        assert_eq!(request.body, b"payload");
    }

    #[test]
    fn test_create_request_rejects_malformed_base64() {
        let mut payload = sample_payload();
        payload["body"] = json!("%%%");
        payload["isBase64Encoded"] = json!(true);
        let result = ApiGatewayAdapter.create_request(event(&payload), "http://example.com");
        assert!(matches!(result, Err(AdapterError::BodyDecode(_))));
    }

    #[test]
    fn test_prepare_response() {
        let response = InternalResponse::new(200)
            .with_header("X-Test", "a")
            .with_body("hello");
        let json = ApiGatewayAdapter.prepare_response(&response).unwrap();
        assert_eq!(
            json,
            r#"{"body":"hello","isBase64Encoded":false,"multiValueHeaders":{"X-Test":["a"]},"statusCode":200}"#
        );
    }

    #[test]
    fn test_prepare_response_groups_repeated_headers() {
        let response = InternalResponse::new(302)
            .with_header("Location", "/login")
            .with_header("Set-Cookie", "a=1")
            .with_header("Set-Cookie", "b=2");
        let json: Value =
            serde_json::from_str(&ApiGatewayAdapter.prepare_response(&response).unwrap()).unwrap();
        assert_eq!(json["multiValueHeaders"]["Set-Cookie"], json!(["a=1", "b=2"]));
        assert_eq!(json["multiValueHeaders"]["Location"], json!(["/login"]));
        assert_eq!(json["statusCode"], 302);
        assert!(json.get("statusDescription").is_none());
    }

    #[test]
    fn test_prepare_response_rejects_binary_body() {
        let response = InternalResponse::new(200).with_body(vec![0xff, 0xfe]);
        let result = ApiGatewayAdapter.prepare_response(&response);
        assert!(matches!(result, Err(AdapterError::ResponseBodyEncoding(_))));
    }
}
