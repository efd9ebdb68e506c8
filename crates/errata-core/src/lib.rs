//! Shared capabilities for translating application errors into responses
//!
//! Kept free of any HTTP framework: the dispatcher works against the
//! [`ResponseSink`] and [`SentinelError`] traits, and the server layer
//! adapts them to axum.

#![allow(clippy::must_use_candidate)]

mod context;
mod error;
mod sentinel;
mod sink;

pub use context::{REQUEST_ID_HEADER, RequestContext};
pub use error::{SentinelError, chain};
pub use sentinel::Sentinel;
pub use sink::{BufferedResponse, ResponseSink, SinkError};
