//! HTTP surface for the course store.
//!
//! Every response body is an [`Envelope`](course_core::Envelope). Failures
//! are mapped to status codes in [`error::ApiError`].

#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::{router, serve};
pub use state::AppState;
