pub mod emitter;
pub mod prometheus;

pub use emitter::MetricsEmitter;
pub use prometheus::{PrometheusEmitter, install_recorder};
