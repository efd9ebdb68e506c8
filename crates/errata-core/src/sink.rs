use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

/// Destination for an error response
///
/// Mirrors the three operations a transport exposes to a handler: set the
/// status line, set a header, write the body. Implementations own any
/// buffering or I/O; from the caller's side `write_body` is synchronous.
pub trait ResponseSink {
    /// Set the response status line
    fn set_status(&mut self, status: StatusCode);

    /// Set a header, replacing any previous value
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write the response body
    ///
    /// # Errors
    ///
    /// Returns an error if the transport refuses the bytes
    fn write_body(&mut self, body: Bytes) -> Result<(), SinkError>;
}

/// Failure to hand the body to the transport
#[derive(Debug, Error)]
pub enum SinkError {
    /// The response was already sent or the connection is gone
    #[error("response already committed")]
    Committed,

    /// Transport-level write error
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory response sink
///
/// Collects status, headers and body so a transport can turn them into
/// its own response type afterwards.
#[derive(Debug, Default, Clone)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status set so far, if any
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert into an `http::Response`, defaulting the status to 500
    pub fn into_http(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body.freeze());
        *response.status_mut() = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), SinkError> {
        self.body.extend_from_slice(&body);
        Ok(())
    }
}
