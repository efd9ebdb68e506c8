use std::ops::RangeInclusive;

use http::StatusCode;
use thiserror::Error;

use crate::ErrorDescriptor;

/// Boxed error returned by validators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Acceptance check applied to every template before it enters a registry
///
/// Implemented for closures, so a plain function works as a validator:
///
/// ```
/// use errata_dispatch::{ErrorDescriptor, Validate};
///
/// let non_empty = |d: &ErrorDescriptor| -> Result<(), String> {
///     if d.message().is_empty() { Err("empty message".to_owned()) } else { Ok(()) }
/// };
/// let descriptor = ErrorDescriptor::new(http::StatusCode::NOT_FOUND, "missing");
/// assert!(non_empty.validate(&descriptor).is_ok());
/// ```
pub trait Validate: Send + Sync {
    /// Check a template
    ///
    /// # Errors
    ///
    /// Returns the reason the template is rejected
    fn validate(&self, descriptor: &ErrorDescriptor) -> Result<(), BoxError>;
}

impl<F, E> Validate for F
where
    F: Fn(&ErrorDescriptor) -> Result<(), E> + Send + Sync,
    E: Into<BoxError>,
{
    fn validate(&self, descriptor: &ErrorDescriptor) -> Result<(), BoxError> {
        self(descriptor).map_err(Into::into)
    }
}

/// Status code outside the range a [`StatusRange`] accepts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status code {status} is outside the allowed range {min}..={max}")]
pub struct StatusOutOfRange {
    pub status: u16,
    pub min: u16,
    pub max: u16,
}

/// Validator accepting only status codes in an inclusive range
#[derive(Debug, Clone)]
pub struct StatusRange {
    range: RangeInclusive<u16>,
}

impl StatusRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { range: min..=max }
    }

    /// Client and server error statuses (`400..=599`)
    pub const fn error_statuses() -> Self {
        Self::new(400, 599)
    }

    pub fn contains(&self, status: StatusCode) -> bool {
        self.range.contains(&status.as_u16())
    }
}

impl Validate for StatusRange {
    fn validate(&self, descriptor: &ErrorDescriptor) -> Result<(), BoxError> {
        if self.contains(descriptor.status()) {
            return Ok(());
        }

        Err(Box::new(StatusOutOfRange {
            status: descriptor.status().as_u16(),
            min: *self.range.start(),
            max: *self.range.end(),
        }))
    }
}
