use anyhow::Context;
use async_trait::async_trait;
use lambda_runtime::tracing::debug;
use reqwest::{Client, Method};

use super::Kernel;
use crate::config::AdapterConfig;
use crate::http::{HeaderBag, InternalRequest, InternalResponse};
use crate::utils::server_var_to_header;

/// Hop-by-hop and framing headers, owned by each connection rather than the message.
const SKIPPED_HEADERS: [&str; 4] = ["host", "content-length", "connection", "transfer-encoding"];

/// Kernel that forwards each request to an upstream HTTP application.
///
/// The request URL already points at the upstream, since it is built from the
/// configured application base URL.
pub struct ForwardingKernel {
    client: Client,
}

impl ForwardingKernel {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a kernel whose client honors the configured upstream timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Kernel for ForwardingKernel {
    async fn handle(&self, request: &InternalRequest) -> anyhow::Result<InternalResponse> {
        let method = Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("Invalid HTTP method: {}", request.method))?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .query(&request.query)
            .body(request.body.clone());

        for (var, value) in &request.server {
            let name = server_var_to_header(var);
            if SKIPPED_HEADERS.contains(&name.as_str()) {
                continue;
            }
            builder = builder.header(name, value);
        }

        debug!(method = %request.method, url = %request.url, "Forwarding request upstream");

        let upstream = builder
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", request.url))?;

        let status = upstream.status().as_u16();
        let mut headers = HeaderBag::new();
        for (name, value) in upstream.headers() {
            if SKIPPED_HEADERS.contains(&name.as_str()) {
                continue;
            }
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let body = upstream
            .bytes()
            .await
            .context("Failed to read upstream response body")?;

        Ok(InternalResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    async fn terminate(&self, request: &InternalRequest, response: &InternalResponse) {
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "Upstream request completed"
        );
    }
}
