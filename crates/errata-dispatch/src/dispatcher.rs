use std::error::Error;
use std::fmt;

use errata_core::{RequestContext, ResponseSink, chain};
use http::{HeaderValue, Method, header::CONTENT_TYPE};
use tracing::Span;

use crate::{APPLICATION_JSON, ErrorDescriptor, Registry, metrics::DispatchMetrics, writer};

/// How an error was resolved to a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The error is or wraps an [`ErrorDescriptor`]
    Direct(&'a ErrorDescriptor),
    /// The error is or wraps a registered sentinel
    Mapped(&'a ErrorDescriptor),
    /// Nothing matched; the generic descriptor applies
    Unmapped(&'a ErrorDescriptor),
}

impl<'a> Resolution<'a> {
    pub const fn descriptor(&self) -> &'a ErrorDescriptor {
        match *self {
            Self::Direct(descriptor) | Self::Mapped(descriptor) | Self::Unmapped(descriptor) => descriptor,
        }
    }

    /// Label used in logs and metrics
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Mapped(_) => "mapped",
            Self::Unmapped(_) => "unmapped",
        }
    }
}

/// Translates application errors into error responses
///
/// Owns an immutable [`Registry`]; share one dispatcher behind an `Arc`
/// across all request handlers.
pub struct Dispatcher {
    registry: Registry,
    metrics: DispatchMetrics,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            metrics: DispatchMetrics::new(),
        }
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decide which descriptor applies to `err`
    ///
    /// A descriptor found in the error chain wins over registry matches;
    /// otherwise the registry is consulted, then the generic descriptor.
    pub fn resolve<'a>(&'a self, err: &'a (dyn Error + 'static)) -> Resolution<'a> {
        if let Some(descriptor) = chain(err).find_map(|cause| cause.downcast_ref::<ErrorDescriptor>()) {
            return Resolution::Direct(descriptor);
        }

        self.registry
            .lookup(err)
            .map_or_else(|| Resolution::Unmapped(self.registry.generic()), Resolution::Mapped)
    }

    /// Log `err` and write its response to `sink`
    ///
    /// Always sets the content type and makes exactly one status and body
    /// write attempt. Failures are logged and never returned.
    pub fn dispatch<S>(&self, ctx: &RequestContext, sink: &mut S, err: &(dyn Error + 'static))
    where
        S: ResponseSink + ?Sized,
    {
        let span = dispatch_span(ctx);
        let _entered = span.enter();

        let resolution = self.resolve(err);
        match resolution {
            Resolution::Direct(_) => tracing::info!(error = %err, "handling error descriptor"),
            Resolution::Mapped(descriptor) => {
                tracing::info!(error = %err, descriptor = %descriptor, "handling mapped error");
            }
            Resolution::Unmapped(_) => tracing::error!(error = %err, "handling unmapped error"),
        }
        self.metrics.record(resolution.outcome());

        sink.set_header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        writer::write(sink, resolution.descriptor(), self.registry.generic());
    }

    /// Write `descriptor` to `sink` without resolving anything
    ///
    /// Uses the cached payload when present and renders otherwise; a
    /// descriptor that cannot be rendered is replaced by the generic one.
    pub fn write<S>(&self, ctx: &RequestContext, sink: &mut S, descriptor: &ErrorDescriptor)
    where
        S: ResponseSink + ?Sized,
    {
        let span = dispatch_span(ctx);
        let _entered = span.enter();

        sink.set_header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        writer::write(sink, descriptor, self.registry.generic());
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").field("registry", &self.registry).finish_non_exhaustive()
    }
}

fn dispatch_span(ctx: &RequestContext) -> Span {
    tracing::info_span!(
        "error_dispatch",
        request_id = ctx.request_id.as_deref(),
        method = ctx.method.as_ref().map(Method::as_str),
        path = ctx.path.as_deref(),
    )
}
