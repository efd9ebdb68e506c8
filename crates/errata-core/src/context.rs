use http::Method;

/// Header used to correlate a request with its log records
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation data threaded through error dispatch
///
/// Only used for logging; dispatch never changes its behavior based on
/// the context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Caller-supplied request id
    pub request_id: Option<String>,
    /// HTTP method of the failed request
    pub method: Option<Method>,
    /// Request path, without the query string
    pub path: Option<String>,
}

impl RequestContext {
    /// Create a context with no correlation data (for non-HTTP callers)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a context from HTTP request parts
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        Self {
            request_id,
            method: Some(parts.method.clone()),
            path: Some(parts.uri.path().to_owned()),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
