use std::error::Error;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message of the descriptor written for every unmapped error
pub const GENERIC_MESSAGE: &str = "something went wrong";

/// Content type of every payload written by the dispatcher
pub const APPLICATION_JSON: &str = "application/json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Externally visible shape of an error
///
/// Serializes to exactly `{"status-code": <u16>, "message": <string>}`.
/// The cached payload and the wrapped cause never reach the wire, and
/// equality only looks at status and message.
///
/// A descriptor is itself an error: application code can return one
/// directly (optionally wrapping the underlying cause) to bypass the
/// registry and pick the exact response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct ErrorDescriptor {
    #[serde(
        rename = "status-code",
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    status: StatusCode,
    message: String,
    #[serde(skip)]
    serialized: Option<Bytes>,
    #[serde(skip)]
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl ErrorDescriptor {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            serialized: None,
            source: None,
        }
    }

    /// The descriptor used when nothing else matches
    pub fn generic() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_MESSAGE)
    }

    /// Attach the lower-level cause this descriptor stands in for
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Payload cached at registry construction, if any
    #[must_use]
    pub const fn serialized(&self) -> Option<&Bytes> {
        self.serialized.as_ref()
    }

    /// Serialize the canonical payload
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the descriptor cannot be encoded
    pub fn render(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }

    /// Keep a payload produced by [`ErrorDescriptor::render`] for the hot path
    pub(crate) fn with_payload(mut self, payload: Bytes) -> Self {
        self.serialized = Some(payload);
        self
    }
}

impl PartialEq for ErrorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.message == other.message
    }
}

impl Eq for ErrorDescriptor {}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status code: '{}', message: '{}'",
            self.status.as_u16(),
            self.message
        )
    }
}

impl Error for ErrorDescriptor {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|source| source as &(dyn Error + 'static))
    }
}
