/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: subscription state gate, /metrics 用の Prometheus handle
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use metrics_exporter_prometheus::PrometheusHandle;

use crate::middleware::subscription_state::SubscriptionStateValidator;

#[derive(Clone)]
pub struct AppState {
    pub subscription_validator: SubscriptionStateValidator,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        subscription_validator: SubscriptionStateValidator,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            subscription_validator,
            metrics_handle,
        }
    }
}
