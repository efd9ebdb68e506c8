use thiserror::Error;

use crate::{ErrorDescriptor, validate::BoxError};

/// Registry construction failures
///
/// Either variant aborts construction; no partially built registry exists.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A validator rejected a template
    #[error("validation failed for error descriptor '{descriptor}': {source}")]
    Validation {
        descriptor: ErrorDescriptor,
        #[source]
        source: BoxError,
    },

    /// A template could not be rendered to its payload
    #[error("could not serialize error descriptor '{descriptor}': {source}")]
    Serialization {
        descriptor: ErrorDescriptor,
        #[source]
        source: serde_json::Error,
    },
}
