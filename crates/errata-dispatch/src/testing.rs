use bytes::Bytes;
use errata_core::{ResponseSink, SinkError};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Sink that records every call, optionally refusing body writes
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub statuses: Vec<StatusCode>,
    pub headers: HeaderMap,
    pub writes: Vec<Bytes>,
    pub attempts: usize,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn body(&self) -> &[u8] {
        self.writes.first().map_or(&[][..], |body| &body[..])
    }
}

impl ResponseSink for RecordingSink {
    fn set_status(&mut self, status: StatusCode) {
        self.statuses.push(status);
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), SinkError> {
        self.attempts += 1;
        if self.fail {
            return Err(SinkError::Committed);
        }
        self.writes.push(body);
        Ok(())
    }
}
