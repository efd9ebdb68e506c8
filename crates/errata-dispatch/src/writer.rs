use bytes::Bytes;
use errata_core::ResponseSink;

use crate::ErrorDescriptor;

/// Write `descriptor` to `sink`, falling back to `generic` if it cannot be rendered
pub(crate) fn write<S>(sink: &mut S, descriptor: &ErrorDescriptor, generic: &ErrorDescriptor)
where
    S: ResponseSink + ?Sized,
{
    // Descriptors from the registry carry their payload; direct ones don't.
    let payload = descriptor
        .serialized()
        .cloned()
        .map_or_else(|| descriptor.render(), Ok);

    emit(sink, descriptor, payload, generic);
}

fn emit<S>(
    sink: &mut S,
    descriptor: &ErrorDescriptor,
    payload: Result<Bytes, serde_json::Error>,
    generic: &ErrorDescriptor,
) where
    S: ResponseSink + ?Sized,
{
    let body = match payload {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(source_error = %descriptor, error = %e, "failed to serialize error descriptor");
            write_generic(sink, generic);
            return;
        }
    };

    sink.set_status(descriptor.status());
    if let Err(e) = sink.write_body(body) {
        tracing::error!(source_error = %descriptor, error = %e, "failed to write error response");
    }
}

fn write_generic<S>(sink: &mut S, generic: &ErrorDescriptor)
where
    S: ResponseSink + ?Sized,
{
    sink.set_status(generic.status());

    let payload = generic.serialized().cloned().map_or_else(|| generic.render(), Ok);
    let result = match payload {
        Ok(body) => sink.write_body(body).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    if let Err(error) = result {
        tracing::error!(%error, "failed to write generic error response");
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use tracing_test::traced_test;

    use super::*;
    use crate::testing::RecordingSink;

    fn generic() -> ErrorDescriptor {
        let generic = ErrorDescriptor::generic();
        let payload = generic.render().unwrap();
        generic.with_payload(payload)
    }

    #[test]
    fn cached_payload_is_written_verbatim() {
        let descriptor = ErrorDescriptor::new(StatusCode::from_u16(123).unwrap(), "foo-message")
            .with_payload(Bytes::from_static(b"cached"));
        let mut sink = RecordingSink::default();

        write(&mut sink, &descriptor, &generic());

        assert_eq!(sink.statuses, [StatusCode::from_u16(123).unwrap()]);
        assert_eq!(sink.writes, [Bytes::from_static(b"cached")]);
    }

    #[test]
    fn descriptor_without_payload_is_rendered() {
        let descriptor = ErrorDescriptor::new(StatusCode::from_u16(456).unwrap(), "bar-message");
        let mut sink = RecordingSink::default();

        write(&mut sink, &descriptor, &generic());

        assert_eq!(sink.statuses, [StatusCode::from_u16(456).unwrap()]);
        assert_eq!(
            sink.writes,
            [Bytes::from_static(br#"{"status-code":456,"message":"bar-message"}"#)]
        );
    }

    #[test]
    #[traced_test]
    fn serialization_failure_falls_back_to_generic() {
        let descriptor = ErrorDescriptor::new(StatusCode::IM_A_TEAPOT, "teapot");
        let failure = serde_json::from_str::<u8>("not json").unwrap_err();
        let mut sink = RecordingSink::default();

        emit(&mut sink, &descriptor, Err(failure), &generic());

        assert_eq!(sink.statuses, [StatusCode::INTERNAL_SERVER_ERROR]);
        assert_eq!(
            sink.writes,
            [Bytes::from_static(br#"{"status-code":500,"message":"something went wrong"}"#)]
        );
        assert!(logs_contain("failed to serialize error descriptor"));
        assert!(logs_contain("status code: '418', message: 'teapot'"));
    }

    #[test]
    #[traced_test]
    fn sink_failure_is_logged_without_retry() {
        let descriptor = ErrorDescriptor::new(StatusCode::NOT_FOUND, "resource missing");
        let mut sink = RecordingSink::failing();

        write(&mut sink, &descriptor, &generic());

        assert_eq!(sink.statuses, [StatusCode::NOT_FOUND]);
        assert_eq!(sink.attempts, 1);
        assert!(logs_contain("failed to write error response"));
        assert!(logs_contain("response already committed"));
    }

    #[test]
    #[traced_test]
    fn generic_write_failure_is_swallowed() {
        let mut sink = RecordingSink::failing();

        write_generic(&mut sink, &generic());

        assert_eq!(sink.statuses, [StatusCode::INTERNAL_SERVER_ERROR]);
        assert_eq!(sink.attempts, 1);
        assert!(logs_contain("failed to write generic error response"));
    }
}
