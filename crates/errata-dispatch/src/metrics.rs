use opentelemetry::{KeyValue, global, metrics::Counter};

/// Errors translated into responses, labelled by `outcome`
pub const DISPATCH_COUNT: &str = "errata.dispatch.count";

/// Instruments recorded by the dispatcher
///
/// Bound to the global meter provider; recording is a no-op until the
/// application installs one.
#[derive(Clone)]
pub(crate) struct DispatchMetrics {
    count: Counter<u64>,
}

impl DispatchMetrics {
    pub(crate) fn new() -> Self {
        let meter = global::meter("errata");
        let count = meter
            .u64_counter(DISPATCH_COUNT)
            .with_description("Errors translated into responses")
            .build();

        Self { count }
    }

    pub(crate) fn record(&self, outcome: &'static str) {
        self.count.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}
