//! The application request-handling pipeline.
//!
//! The bridge never interprets requests itself. It hands them to a [`Kernel`]
//! and relays whatever comes back.

mod forwarding;

pub use forwarding::ForwardingKernel;

use async_trait::async_trait;

use crate::http::{InternalRequest, InternalResponse};
use crate::models::AdapterError;

/// Request-handling pipeline behind the bridge.
///
/// This trait is the seam that lets tests swap the real application for a
/// mock, the same way HTTP calls are abstracted elsewhere.
#[async_trait]
pub trait Kernel: Send + Sync {
    /// Handle one request.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the application; the bridge surfaces it
    /// to the runtime unchanged.
    async fn handle(&self, request: &InternalRequest) -> anyhow::Result<InternalResponse>;

    /// Post-response cleanup, such as flushing deferred work.
    async fn terminate(&self, request: &InternalRequest, response: &InternalResponse);
}

/// Runs a request through the kernel and its termination hook.
///
/// # Errors
///
/// Returns [`AdapterError::Kernel`] wrapping the kernel's own error when
/// `handle` fails. `terminate` is not called in that case.
pub async fn dispatch(
    kernel: &dyn Kernel,
    request: InternalRequest,
) -> Result<InternalResponse, AdapterError> {
    let response = kernel.handle(&request).await?;
    kernel.terminate(&request, &response).await;
    Ok(response)
}
