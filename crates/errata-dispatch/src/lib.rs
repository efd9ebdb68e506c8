//! Error registry and dispatcher
//!
//! Translates application errors into `{"status-code", "message"}` JSON
//! responses. Known errors are registered once at startup against
//! pre-rendered [`ErrorDescriptor`]s; at request time the [`Dispatcher`]
//! picks the descriptor an error carries, the one its sentinel maps to, or
//! the generic 500, logs the decision and writes the payload to a
//! [`errata_core::ResponseSink`].
//!
//! ```
//! use errata_core::{BufferedResponse, RequestContext, Sentinel};
//! use errata_dispatch::{Dispatcher, ErrorDescriptor, Registry, StatusRange};
//! use http::StatusCode;
//!
//! const NOT_FOUND: Sentinel = Sentinel::new("not_found");
//!
//! let registry = Registry::builder()
//!     .register(NOT_FOUND, ErrorDescriptor::new(StatusCode::NOT_FOUND, "resource missing"))
//!     .validator(StatusRange::error_statuses())
//!     .build()?;
//! let dispatcher = Dispatcher::new(registry);
//!
//! let mut response = BufferedResponse::new();
//! dispatcher.dispatch(&RequestContext::empty(), &mut response, &NOT_FOUND);
//!
//! assert_eq!(response.status(), Some(StatusCode::NOT_FOUND));
//! assert_eq!(response.body(), br#"{"status-code":404,"message":"resource missing"}"#);
//! # Ok::<(), errata_dispatch::RegistryError>(())
//! ```

#![allow(clippy::must_use_candidate)]

mod descriptor;
mod dispatcher;
mod error;
pub mod metrics;
mod registry;
#[cfg(test)]
mod testing;
mod validate;
mod writer;

pub use descriptor::{APPLICATION_JSON, ErrorDescriptor, GENERIC_MESSAGE};
pub use dispatcher::{Dispatcher, Resolution};
pub use error::RegistryError;
pub use registry::{ErrorTable, Registry, RegistryBuilder};
pub use validate::{BoxError, StatusOutOfRange, StatusRange, Validate};
