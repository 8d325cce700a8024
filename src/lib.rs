//! snoolink - lazily materialized Reddit submissions.
//!
//! A [`Submission`](models::Submission) is created from an id, a URL or a
//! record already in hand, and fetches its full data and comment tree on the
//! first read of a field it does not have.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod models;
pub mod repositories;
pub mod transport;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
