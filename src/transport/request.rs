//! Request builder for fluent API calls.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::transport::reply::{split_listings, Listing, Params};
use crate::transport::traits::Transport;

/// A builder for constructing and executing API requests.
///
/// `Request` provides a fluent API for adding parameters and executing
/// reads or writes against any [`Transport`].
///
/// # Example
///
/// ```ignore
/// let (primary, comments) = Request::new(&transport, "comments/2gmzqe/")
///     .param("limit", 2048)
///     .param("sort", "best")
///     .fetch_listings()
///     .await?;
/// ```
pub struct Request<'a, T: Transport + ?Sized> {
    transport: &'a T,
    path: String,
    params: Params,
}

impl<'a, T: Transport + ?Sized> Request<'a, T> {
    /// Creates a new request builder.
    pub fn new(transport: &'a T, path: &str) -> Self {
        Self {
            transport,
            path: path.to_string(),
            params: Params::new(),
        }
    }

    /// Adds a parameter to the request.
    ///
    /// Values that do not serialize to JSON are dropped with a warning;
    /// callers pass primitives.
    pub fn param<V: Serialize>(mut self, name: &str, value: V) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => {
                self.params.insert(name.to_string(), json_value);
            }
            Err(e) => tracing::warn!(param = name, error = %e, "Dropping unserializable parameter"),
        }
        self
    }

    /// Adds a parameter that's already a JSON value.
    pub fn param_raw(mut self, name: &str, value: JsonValue) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Issues the request as a read and returns the decoded reply.
    pub async fn fetch(self) -> Result<JsonValue, AppError> {
        tracing::debug!(path = %self.path, "GET");
        Ok(self.transport.get(&self.path, self.params).await?)
    }

    /// Issues the request as a read and splits the reply into
    /// `(primary, secondary)` listings.
    pub async fn fetch_listings(self) -> Result<(Listing, Listing), AppError> {
        let path = self.path.clone();
        let reply = self.fetch().await?;
        split_listings(&path, reply)
    }

    /// Issues the request as a write, sending the parameters as form data.
    pub async fn post(self) -> Result<JsonValue, AppError> {
        tracing::debug!(path = %self.path, "POST");
        Ok(self.transport.post(&self.path, self.params).await?)
    }
}

/// Extension trait providing a convenient `request()` method.
///
/// This trait is automatically implemented for all [`Transport`]
/// types, including `Arc<dyn Transport>`.
pub trait RequestExt: Transport {
    /// Creates a new request builder for this transport.
    fn request(&self, path: &str) -> Request<'_, Self>
    where
        Self: Sized,
    {
        Request::new(self, path)
    }
}

// Blanket implementation for all Transport types
impl<T: Transport> RequestExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use serde_json::json;
    use std::collections::HashMap;

    // Mock transport for testing
    struct MockTransport {
        expected_path: String,
        expected_params: Params,
        reply: JsonValue,
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn get(&self, path: &str, params: Params) -> Result<JsonValue, TransportError> {
            assert_eq!(path, self.expected_path);
            assert_eq!(params, self.expected_params);
            Ok(self.reply.clone())
        }

        async fn post(&self, path: &str, data: Params) -> Result<JsonValue, TransportError> {
            assert_eq!(path, self.expected_path);
            assert_eq!(data, self.expected_params);
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_request_no_params() {
        let transport = MockTransport {
            expected_path: "api/v1/me".to_string(),
            expected_params: HashMap::new(),
            reply: json!({"name": "spez"}),
        };

        let reply = transport.request("api/v1/me").fetch().await.unwrap();
        assert_eq!(reply["name"], "spez");
    }

    #[tokio::test]
    async fn test_request_with_params() {
        let mut expected_params = HashMap::new();
        expected_params.insert("limit".to_string(), json!(2048));
        expected_params.insert("sort".to_string(), json!("best"));

        let listing = json!({"kind": "Listing", "data": {"children": []}});
        let transport = MockTransport {
            expected_path: "comments/abc/".to_string(),
            expected_params,
            reply: json!([listing.clone(), listing]),
        };

        let (primary, secondary) = transport
            .request("comments/abc/")
            .param("limit", 2048)
            .param("sort", "best")
            .fetch_listings()
            .await
            .unwrap();
        assert!(primary.children.is_empty());
        assert!(secondary.children.is_empty());
    }

    #[tokio::test]
    async fn test_request_post() {
        let mut expected_params = HashMap::new();
        expected_params.insert("id".to_string(), json!("t3_abc"));

        let transport = MockTransport {
            expected_path: "api/hide/".to_string(),
            expected_params,
            reply: json!({}),
        };

        let result = transport
            .request("api/hide/")
            .param("id", "t3_abc")
            .post()
            .await;
        assert!(result.is_ok());
    }
}
