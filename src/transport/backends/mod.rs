//! Backend implementations of [`Transport`](crate::transport::Transport).
//!
//! # Available Backends
//!
//! | Backend | Module | Use |
//! |---------|--------|-----|
//! | HTTP (reqwest) | [`http`] | Live API access |
//! | In-memory | [`memory`] | Tests and offline replay of saved replies |
//!
//! # Implementing a Backend
//!
//! 1. Create a client struct holding whatever connection state is needed
//! 2. Implement `Transport::get` returning the decoded JSON reply
//! 3. Implement `Transport::post` sending the parameters as form data
//! 4. Map failures to [`TransportError`](crate::transport::TransportError)

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::{MemoryTransport, Method, RecordedRequest};
