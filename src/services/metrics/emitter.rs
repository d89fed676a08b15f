//! Metrics emitter interface.
//!
//! Callers treat emission as fire-and-forget: there is no error channel,
//! and a failing backend must never change the outcome of a request.

/// Sink for point-in-time observations.
///
/// Labels are passed as borrowed pairs; implementations copy what they keep.
pub trait MetricsEmitter: Send + Sync + 'static {
    // Returns the backend name (for startup logs).
    fn backend_name(&self) -> &'static str;

    fn emit_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]);
}
