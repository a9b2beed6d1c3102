//! Error types for the gateway bridge.
//!
//! Every stage of an invocation reports failures through [`AdapterError`], so
//! a failing stage never leaves a half-built gateway response behind.

use std::string::FromUtf8Error;

/// Failure of a single adapter invocation.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// No registered adapter recognized the payload shape.
    #[error("no adapter can handle the incoming event")]
    NoMatchingAdapter,
    /// The payload looked like a known event but did not deserialize.
    #[error("invalid gateway event: {0}")]
    InvalidEvent(#[source] serde_json::Error),
    /// A percent-encoded query parameter did not decode to UTF-8.
    #[error("invalid query string encoding: {0}")]
    QueryDecode(#[source] FromUtf8Error),
    /// `isBase64Encoded` was set but the body is not valid base64.
    #[error("failed to decode base64 request body: {0}")]
    BodyDecode(#[from] base64::DecodeError),
    /// The request-handling kernel failed; the original error is kept as-is.
    #[error(transparent)]
    Kernel(#[from] anyhow::Error),
    /// The gateway response could not be written as JSON.
    #[error("failed to serialize gateway response: {0}")]
    Serialization(#[source] serde_json::Error),
    /// The kernel produced a body that is not UTF-8 text.
    #[error("response body is not valid UTF-8: {0}")]
    ResponseBodyEncoding(#[from] FromUtf8Error),
}

impl AdapterError {
    /// Stable identifier reported to the Lambda runtime as `errorType`.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NoMatchingAdapter => "NoMatchingAdapter",
            Self::InvalidEvent(_) | Self::QueryDecode(_) => "InvalidEvent",
            Self::BodyDecode(_) => "BodyDecodeError",
            Self::Kernel(_) => "KernelError",
            Self::Serialization(_) | Self::ResponseBodyEncoding(_) => "SerializationError",
        }
    }
}

/// Configuration could not be resolved at cold start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
