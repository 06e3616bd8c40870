use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport seam to the remote Gateway Service.
///
/// Implementations perform exactly one request/response exchange per call and
/// never retry; duplicate-submission policy belongs to the caller via the
/// request's allow-duplicates flag. HTTP, TLS, and authentication token
/// acquisition all live behind this trait.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Sends one serialized request and returns the gateway's raw reply.
    ///
    /// Fails with `GatewayError::Transport` when no response was obtained.
    /// Well-formed business failures are not errors at this level; they come
    /// back inside the reply payload.
    async fn exchange(&self, request: serde_json::Value) -> Result<serde_json::Value>;
}

pub type GatewayTransportArc = Arc<dyn GatewayTransport>;
