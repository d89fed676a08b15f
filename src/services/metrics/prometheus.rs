use metrics::{Label, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::services::metrics::emitter::MetricsEmitter;

/// Emitter backed by the global `metrics` recorder.
///
/// The recorder is installed once per process by [`install_recorder`];
/// until then the facade is a no-op, which keeps emission infallible.
#[derive(Clone, Debug, Default)]
pub struct PrometheusEmitter;

impl PrometheusEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsEmitter for PrometheusEmitter {
    fn backend_name(&self) -> &'static str {
        "prometheus"
    }

    fn emit_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let labels: Vec<Label> = labels
            .iter()
            .map(|(k, v)| Label::new(k.to_string(), v.to_string()))
            .collect();

        gauge!(name.to_string(), labels).set(value);
    }
}

/// Install the Prometheus recorder and return the handle used by `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
