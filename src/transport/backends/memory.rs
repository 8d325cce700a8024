//! In-memory backend that replays canned replies.
//!
//! Replies are registered per method and path. When several replies are
//! queued for the same request they are served in order and the last one
//! keeps answering. Every request is recorded so callers can assert on what
//! went over the wire.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::transport::error::TransportError;
use crate::transport::reply::Params;
use crate::transport::traits::Transport;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
enum CannedReply {
    Json(JsonValue),
    Status(u16),
}

#[derive(Default)]
struct State {
    replies: HashMap<(Method, String), VecDeque<CannedReply>>,
    requests: Vec<RecordedRequest>,
}

/// Transport answering from registered replies.
#[derive(Default)]
pub struct MemoryTransport {
    state: Mutex<State>,
    latency: Option<Duration>,
}

impl MemoryTransport {
    /// Creates an empty transport. Unregistered requests fail with
    /// [`TransportError::NoReply`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every reply, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Loads a reply for `GET path` from a JSON file.
    pub fn with_reply_file(self, path: &str, file: &Path) -> Result<Self, TransportError> {
        let content = std::fs::read_to_string(file).map_err(|e| TransportError::Decode {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;
        let value = serde_json::from_str(&content).map_err(|e| TransportError::Decode {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;
        self.reply(Method::Get, path, value);
        Ok(self)
    }

    /// Queues a JSON reply for `method path`.
    pub fn reply(&self, method: Method, path: &str, value: JsonValue) -> &Self {
        self.queue(method, path, CannedReply::Json(value))
    }

    /// Queues a failure with the given HTTP status for `method path`.
    pub fn fail(&self, method: Method, path: &str, status: u16) -> &Self {
        self.queue(method, path, CannedReply::Status(status))
    }

    /// Returns every request seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Counts requests matching `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn queue(&self, method: Method, path: &str, reply: CannedReply) -> &Self {
        self.lock()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    async fn answer(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<JsonValue, TransportError> {
        let reply = {
            let mut state = self.lock();
            state.requests.push(RecordedRequest {
                method,
                path: path.to_string(),
                params,
            });
            state
                .replies
                .get_mut(&(method, path.to_string()))
                .and_then(|queue| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Some(CannedReply::Json(value)) => Ok(value),
            Some(CannedReply::Status(status)) => Err(TransportError::Status {
                status,
                path: path.to_string(),
            }),
            None => Err(TransportError::NoReply {
                method: method.as_str(),
                path: path.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, path: &str, params: Params) -> Result<JsonValue, TransportError> {
        self.answer(Method::Get, path, params).await
    }

    async fn post(&self, path: &str, data: Params) -> Result<JsonValue, TransportError> {
        self.answer(Method::Post, path, data).await
    }
}
