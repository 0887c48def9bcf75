//! Metric names and instruments for the completion forwarder

use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram};

/// Outbound calls, one per (model, attempt)
pub const UPSTREAM_ATTEMPTS: &str = "tutor.upstream.attempts";
/// Requests answered by the local fallback
pub const FORWARD_FALLBACKS: &str = "tutor.forward.fallbacks";
/// End-to-end duration of a forwarded request
pub const FORWARD_DURATION: &str = "tutor.forward.duration";

/// Instruments recorded by the forwarder
///
/// Backed by the global meter provider, so they are no-ops until
/// [`crate::init`] installs an exporter.
#[derive(Clone)]
pub struct ForwarderMetrics {
    attempts: Counter<u64>,
    fallbacks: Counter<u64>,
    duration: Histogram<f64>,
}

impl ForwarderMetrics {
    pub fn new() -> Self {
        let meter = global::meter("tutor");

        Self {
            attempts: meter
                .u64_counter(UPSTREAM_ATTEMPTS)
                .with_description("Outbound chat-completion calls")
                .build(),
            fallbacks: meter
                .u64_counter(FORWARD_FALLBACKS)
                .with_description("Requests answered by the local fallback")
                .build(),
            duration: meter
                .f64_histogram(FORWARD_DURATION)
                .with_unit("s")
                .with_description("Time spent forwarding one request")
                .build(),
        }
    }

    /// Count one outbound call and how it ended
    pub fn record_attempt(&self, model: &str, result: &'static str) {
        self.attempts.add(
            1,
            &[KeyValue::new("model", model.to_owned()), KeyValue::new("result", result)],
        );
    }

    /// Count a request that ended in the local fallback
    pub fn record_fallback(&self) {
        self.fallbacks.add(1, &[]);
    }

    /// Record how long a request took, tagged by where the answer came from
    pub fn record_duration(&self, start: Instant, source: &'static str) {
        self.duration
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("source", source)]);
    }
}

impl Default for ForwarderMetrics {
    fn default() -> Self {
        Self::new()
    }
}
