//! Data access layer for remote operations.
//!
//! Repositories wrap requests against the transport and are resolved
//! from the [`Context`](crate::context::Context) with the `FromContext`
//! derive macro.

mod submission;

pub use submission::SubmissionRepository;
