//! Field mapping helpers shared by the event adapters.
//!
//! These are pure functions so the mapping rules can be tested without an
//! event, a kernel, or the Lambda runtime.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeMap;
use std::string::FromUtf8Error;

const SERVER_VAR_PREFIX: &str = "HTTP_";
const CONTENT_TYPE_VAR: &str = "CONTENT_TYPE";

/// Joins the event path onto the application base URL.
///
/// One leading `/` is stripped from `path` before joining with a single `/`,
/// then every leading and trailing `/` is trimmed from the result. A bare `/`
/// path therefore yields the base URL alone.
///
/// # Arguments
///
/// * `base_url` - The application URL, e.g. `http://example.com`
/// * `path` - The request path from the event, e.g. `/foo/bar`
#[must_use]
pub fn prepare_url(base_url: &str, path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base_url}/{path}").trim_matches('/').to_string()
}

/// Converts a header name to its server variable name.
///
/// `Content-Type` → `CONTENT_TYPE`, `X-Custom` → `HTTP_X_CUSTOM`. Names already
/// carrying the `HTTP_` prefix are left unprefixed.
#[must_use]
pub fn header_to_server_var(name: &str) -> String {
    let name = name.to_ascii_uppercase().replace('-', "_");
    if name.starts_with(SERVER_VAR_PREFIX) || name == CONTENT_TYPE_VAR {
        name
    } else {
        format!("{SERVER_VAR_PREFIX}{name}")
    }
}

/// Reverses [`header_to_server_var`] into a lowercase header name.
///
/// `HTTP_X_CUSTOM` → `x-custom`, `CONTENT_TYPE` → `content-type`.
#[must_use]
pub fn server_var_to_header(var: &str) -> String {
    var.strip_prefix(SERVER_VAR_PREFIX)
        .unwrap_or(var)
        .to_ascii_lowercase()
        .replace('_', "-")
}

/// Builds the server variable map from request headers.
///
/// Headers are applied in the order given; when two names map to the same
/// variable the later value wins.
pub fn transform_headers_to_server_vars<'a, I>(headers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .map(|(name, value)| (header_to_server_var(name), value.to_string()))
        .collect()
}

/// Returns the raw request body, decoding it first when it is base64.
///
/// # Errors
///
/// Returns a `DecodeError` if `is_base64_encoded` is set and `body` is not
/// valid standard base64.
pub fn decode_body(body: &str, is_base64_encoded: bool) -> Result<Vec<u8>, base64::DecodeError> {
    if is_base64_encoded {
        STANDARD.decode(body)
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

/// Percent-decodes a raw query string component.
///
/// `+` is read as a space, as in form-encoded query strings.
///
/// # Errors
///
/// Returns a `FromUtf8Error` if the decoded bytes are not UTF-8.
pub fn decode_query_component(raw: &str) -> Result<String, FromUtf8Error> {
    urlencoding::decode(&raw.replace('+', " ")).map(std::borrow::Cow::into_owned)
}

/// Percent-decodes every key and value of a raw query map.
///
/// # Errors
///
/// Returns a `FromUtf8Error` if any decoded key or value is not UTF-8.
pub fn decode_query(
    query: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, FromUtf8Error> {
    query
        .into_iter()
        .map(|(key, value)| Ok((decode_query_component(&key)?, decode_query_component(&value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_url() {
        assert_eq!(
            prepare_url("http://example.com", "/foo/bar"),
            "http://example.com/foo/bar"
        );
        assert_eq!(prepare_url("http://example.com", "foo"), "http://example.com/foo");
        assert_eq!(prepare_url("http://example.com", "/foo/"), "http://example.com/foo");
    }

    #[test]
    fn test_prepare_url_root_path_yields_base_url() {
        assert_eq!(prepare_url("http://example.com", "/"), "http://example.com");
        assert_eq!(prepare_url("http://example.com", ""), "http://example.com");
    }

    #[test]
    fn test_prepare_url_keeps_base_trailing_slash_join() {
        // Only the ends are trimmed, so a trailing slash on the base survives the join.
        assert_eq!(
            prepare_url("http://example.com/", "/foo"),
            "http://example.com//foo"
        );
    }

    #[test]
    fn test_header_to_server_var() {
        assert_eq!(header_to_server_var("Content-Type"), "CONTENT_TYPE");
        assert_eq!(header_to_server_var("content-type"), "CONTENT_TYPE");
        assert_eq!(header_to_server_var("X-Custom"), "HTTP_X_CUSTOM");
        assert_eq!(header_to_server_var("accept"), "HTTP_ACCEPT");
        assert_eq!(header_to_server_var("Http-Host"), "HTTP_HOST");
        assert_eq!(header_to_server_var("Content-Length"), "HTTP_CONTENT_LENGTH");
    }

    #[test]
    fn test_header_to_server_var_only_uppercases_ascii() {
        assert_eq!(header_to_server_var("x-\u{e9}t\u{e9}"), "HTTP_X_\u{e9}T\u{e9}");
        assert_eq!(header_to_server_var("stra\u{df}e"), "HTTP_STRA\u{df}E");
    }

    #[test]
    fn test_decode_query() {
        let raw: BTreeMap<String, String> = [("q", "a%20b"), ("sort%5Bby%5D", "name+asc"), ("plain", "x")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let decoded = decode_query(raw).unwrap();
        assert_eq!(decoded.get("q").map(String::as_str), Some("a b"));
        assert_eq!(decoded.get("sort[by]").map(String::as_str), Some("name asc"));
        assert_eq!(decoded.get("plain").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_decode_query_rejects_invalid_utf8() {
        assert!(decode_query_component("%ff%fe").is_err());
        assert_eq!(decode_query_component("%2B1").unwrap(), "+1");
    }

    #[test]
    fn test_server_var_to_header() {
        assert_eq!(server_var_to_header("HTTP_X_CUSTOM"), "x-custom");
        assert_eq!(server_var_to_header("CONTENT_TYPE"), "content-type");
        assert_eq!(server_var_to_header("HTTP_ACCEPT"), "accept");
    }

    #[test]
    fn test_transform_headers_last_write_wins() {
        let vars = transform_headers_to_server_vars([
            ("X-Forwarded-For", "1.1.1.1"),
            ("Accept", "text/html"),
            ("x_forwarded_for", "2.2.2.2"),
        ]);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("HTTP_X_FORWARDED_FOR").map(String::as_str), Some("2.2.2.2"));
        assert_eq!(vars.get("HTTP_ACCEPT").map(String::as_str), Some("text/html"));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body("cGF5bG9hZA==", true).unwrap(), b"payload");
        assert_eq!(decode_body("cGF5bG9hZA==", false).unwrap(), b"cGF5bG9hZA==");
        assert_eq!(decode_body("", true).unwrap(), b"");
    }

    #[test]
    fn test_decode_body_rejects_malformed_base64() {
        assert!(decode_body("not base64!", true).is_err());
    }
}
