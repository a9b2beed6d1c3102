//! Internal HTTP request and response representation.
//!
//! Adapters build an [`InternalRequest`] from a gateway event and turn the
//! kernel's [`InternalResponse`] back into a gateway payload.

mod headers;

pub use headers::HeaderBag;

use std::collections::BTreeMap;

/// Request handed to the kernel.
///
/// Headers travel as CGI-style server variables (`HTTP_ACCEPT`,
/// `CONTENT_TYPE`, ...), matching what PHP-style application kernels expect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalRequest {
    pub method: String,
    /// Fully qualified URL, without the query string.
    pub url: String,
    pub query: BTreeMap<String, String>,
    pub server: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// Response produced by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalResponse {
    pub status: u16,
    pub headers: HeaderBag,
    pub body: Vec<u8>,
}

impl InternalResponse {
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderBag::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

impl Default for InternalResponse {
    fn default() -> Self {
        Self::new(200)
    }
}
