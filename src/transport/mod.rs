//! Transport abstraction for remote API access.
//!
//! The object model never talks to the network directly. It issues reads
//! and writes through the [`Transport`] trait, so the same code runs
//! against the live API or against canned replies.
//!
//! # Usage
//!
//! ```ignore
//! use snoolink::transport::{RequestExt, Transport};
//!
//! // Read with parameters
//! let reply = transport.request("comments/2gmzqe/")
//!     .param("limit", 2048)
//!     .param("sort", "best")
//!     .fetch()
//!     .await?;
//!
//! // Two-part reply: the record itself plus its nested listing
//! let (primary, secondary) = transport.request("comments/2gmzqe/")
//!     .fetch_listings()
//!     .await?;
//!
//! // Write
//! transport.request("api/hide/")
//!     .param("id", "t3_2gmzqe")
//!     .post()
//!     .await?;
//! ```

mod error;
mod macros;
mod reply;
mod request;
mod traits;

pub mod backends;
pub mod endpoints;

// Re-export core types
pub use error::TransportError;
pub use reply::{param_to_string, split_listings, Fields, Listing, Params, Thing};
pub use request::{Request, RequestExt};
pub use traits::Transport;

// Re-export macro (defined at crate root via #[macro_export])
#[doc(inline)]
pub use crate::api_request;
