//! Core trait for remote API access.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::transport::error::TransportError;
use crate::transport::reply::Params;

/// Issues authenticated reads and writes against the remote API.
///
/// This is the only seam between the object model and the network.
/// Backends own authentication and timeouts; callers receive
/// either the decoded JSON reply or a [`TransportError`] they propagate
/// unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a read and returns the decoded reply.
    ///
    /// # Arguments
    ///
    /// * `path` - API path relative to the backend's base URL (e.g. `comments/2gmzqe/`)
    /// * `params` - Query-string parameters
    async fn get(&self, path: &str, params: Params) -> Result<JsonValue, TransportError>;

    /// Issues a write and returns the decoded reply.
    ///
    /// # Arguments
    ///
    /// * `path` - API path relative to the backend's base URL
    /// * `data` - Flat form data; values are primitives
    async fn post(&self, path: &str, data: Params) -> Result<JsonValue, TransportError>;
}

// Forward through shared handles so `Arc<dyn Transport>` is itself a transport
#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, path: &str, params: Params) -> Result<JsonValue, TransportError> {
        (**self).get(path, params).await
    }

    async fn post(&self, path: &str, data: Params) -> Result<JsonValue, TransportError> {
        (**self).post(path, data).await
    }
}
