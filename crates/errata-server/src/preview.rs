//! Handlers that fail on purpose so configured errors can be inspected over HTTP

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query};
use errata_core::Sentinel;
use errata_dispatch::ErrorDescriptor;
use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::HandlerError;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("preview of '{name}'")]
    Sentinel {
        name: String,
        #[source]
        source: Sentinel,
    },
}

#[derive(Debug, Deserialize)]
pub struct DirectQuery {
    status: u16,
    message: String,
}

/// Fail with the sentinel `name`, wrapped in one context layer
pub async fn preview_handler(Path(name): Path<String>) -> Result<(), HandlerError> {
    Err(PreviewError::Sentinel {
        source: Sentinel::named(name.clone()),
        name,
    }
    .into())
}

/// Fail with a descriptor built from the query that wraps the sentinel `name`
///
/// A malformed query or a status that cannot be a final response is
/// answered with a `400` descriptor instead.
pub async fn preview_direct_handler(
    Path(name): Path<String>,
    query: Result<Query<DirectQuery>, QueryRejection>,
) -> Result<(), HandlerError> {
    let Query(query) = query.map_err(|rejection| bad_request(rejection.body_text()))?;

    let status = StatusCode::from_u16(query.status)
        .ok()
        .filter(|status| !status.is_informational())
        .ok_or_else(|| bad_request(format!("invalid status code {}", query.status)))?;

    Err(ErrorDescriptor::new(status, query.message)
        .with_source(Sentinel::named(name))
        .into())
}

fn bad_request(message: String) -> HandlerError {
    ErrorDescriptor::new(StatusCode::BAD_REQUEST, message).into()
}
