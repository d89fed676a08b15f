/*
 * Responsibility
 * - URL 構造を定義 (ARM は path でなく api-version query で version を分けるので v1 は切らない)
 * - /health, /metrics は gate 無し
 * - /subscriptions/{subscriptionid}/... は subscription_state gate を route_layer で適用
 */
use axum::{
    Router,
    routing::{any, get},
};

use crate::api::handlers::{
    health::health,
    metrics::metrics,
    resources::{list_resources, resource},
};
use crate::middleware::subscription_state;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let subscription_scoped = Router::new()
        .route(
            "/subscriptions/{subscriptionid}/providers/{provider}/{resourcetype}",
            get(list_resources),
        )
        .route(
            "/subscriptions/{subscriptionid}/resourceGroups/{resourcegroupname}/providers/{provider}/{resourcetype}/{resourcename}",
            any(resource),
        );
    let subscription_scoped =
        subscription_state::apply(subscription_scoped, state.subscription_validator.clone());

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(subscription_scoped)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::subscription_state::SubscriptionStateValidator;
    use crate::services::metrics::PrometheusEmitter;
    use crate::services::subscriptions::{InMemorySubscriptionCache, Subscription, SubscriptionState};

    const CLUSTER_PATH: &str = "/resourceGroups/rg/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters/c1";

    fn app(cache: InMemorySubscriptionCache) -> Router {
        let validator = SubscriptionStateValidator::new(
            Arc::new(cache),
            Arc::new(PrometheusEmitter::new()),
            "westus3",
        );
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState::new(validator, handle);
        routes(&state).with_state(state)
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_is_not_gated() {
        let (status, body) = send(
            app(InMemorySubscriptionCache::new()),
            Method::GET,
            "/health",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn metrics_is_not_gated() {
        let (status, _) = send(
            app(InMemorySubscriptionCache::new()),
            Method::GET,
            "/metrics",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn registered_resource_request_sees_subscription_context() {
        let cache = InMemorySubscriptionCache::new();
        cache.upsert(Subscription::new("sub-1", SubscriptionState::Registered));
        let uri = format!("/subscriptions/sub-1{CLUSTER_PATH}");

        let (status, body) = send(app(cache), Method::PUT, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], uri);
        assert_eq!(body["method"], "PUT");
        assert_eq!(body["subscription"]["subscriptionId"], "sub-1");
        assert_eq!(body["subscription"]["state"], "Registered");
    }

    #[tokio::test]
    async fn warned_subscription_blocks_writes_but_not_reads() {
        let cache = InMemorySubscriptionCache::new();
        cache.upsert(Subscription::new("sub-2", SubscriptionState::Warned));
        let uri = format!("/subscriptions/sub-2{CLUSTER_PATH}");

        let (status, body) = send(app(cache.clone()), Method::PATCH, &uri).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "InvalidSubscriptionState");

        let (status, body) = send(app(cache), Method::GET, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subscription"]["state"], "Warned");
    }

    #[tokio::test]
    async fn list_for_unknown_subscription_is_rejected() {
        let (status, body) = send(
            app(InMemorySubscriptionCache::new()),
            Method::GET,
            "/subscriptions/sub-404/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Request is not allowed in unregistered subscription 'sub-404'."
        );
    }

    #[tokio::test]
    async fn list_for_registered_subscription_is_empty() {
        let cache = InMemorySubscriptionCache::new();
        cache.upsert(Subscription::new("sub-3", SubscriptionState::Registered));

        let (status, body) = send(
            app(cache),
            Method::GET,
            "/subscriptions/sub-3/providers/Microsoft.RedHatOpenShift/hcpOpenShiftClusters",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], Value::Array(Vec::new()));
    }
}
