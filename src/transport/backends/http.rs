//! HTTP backend using reqwest.
//!
//! Sends every request to the configured OAuth base URL with the configured
//! user agent and, when present, a bearer token. Reads carry `raw_json=1` so
//! text fields arrive unescaped. Writes are form encoded.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use url::Url;

use crate::config::RedditConfig;
use crate::transport::error::TransportError;
use crate::transport::reply::{param_to_string, Params};
use crate::transport::traits::Transport;

/// HTTP transport for the Reddit API.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpTransport {
    /// Creates a transport from the `[reddit]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the client
    /// cannot be built.
    pub fn new(config: &RedditConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(&config.oauth_url)?,
            access_token: config.access_token.clone(),
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(&self, path: &str, builder: RequestBuilder) -> Result<JsonValue, TransportError> {
        let builder = match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "Request rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, params: Params) -> Result<JsonValue, TransportError> {
        let url = self.endpoint(path)?;
        let mut query = form_pairs(&params);
        query.push(("raw_json".to_string(), "1".to_string()));
        self.send(path, self.client.get(url).query(&query)).await
    }

    async fn post(&self, path: &str, data: Params) -> Result<JsonValue, TransportError> {
        let url = self.endpoint(path)?;
        let form = form_pairs(&data);
        self.send(path, self.client.post(url).form(&form)).await
    }
}

/// Parses the base URL, ensuring it ends with `/` so paths join beneath it.
fn base_url(raw: &str) -> Result<Url, TransportError> {
    let mut raw = raw.to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Ok(Url::parse(&raw)?)
}

/// Renders parameters as sorted key/value pairs.
fn form_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (k.clone(), param_to_string(v)))
        .collect();
    pairs.sort();
    pairs
}
