use std::error::Error;
use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use errata_dispatch::RegistryError;
use http::StatusCode;
use thiserror::Error;

/// Failure to assemble the server from configuration
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("error '{name}' has invalid status code {status}")]
    InvalidStatus { name: String, status: u16 },

    #[error("failed to build error registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Error returned by handlers and rendered by the dispatch middleware
///
/// Converts from any `std::error::Error`, so handlers can use `?` on their
/// own errors. `anyhow::Error` is not an `Error` and cannot share that
/// conversion; use [`HandlerError::from_anyhow`] with `map_err` instead.
/// The response produced here is a placeholder 500 that carries the error
/// as an extension until the middleware replaces it.
#[derive(Clone)]
pub struct HandlerError(Arc<dyn Error + Send + Sync>);

impl HandlerError {
    /// Wrap an `anyhow::Error`, keeping its context chain walkable
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        let boxed: Box<dyn Error + Send + Sync> = error.into();
        Self(Arc::from(boxed))
    }

    /// The wrapped error
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl<E> From<E> for HandlerError
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(Arc::new(error))
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerError").field(&self.0.to_string()).finish()
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}
