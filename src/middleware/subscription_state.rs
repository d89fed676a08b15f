//! Subscription lifecycle gate for subscription-scoped routes.
//!
//! For every request under `/subscriptions/{subscriptionid}/...`:
//! - `subscriptionid` が無い / 空 → 400 InvalidParameter
//! - cache に無い → 400 InvalidSubscriptionState (unregistered)
//! - cache に有る → `subscription_lifecycle` gauge を 1 回 emit し、state で分岐する
//!
//! | state                 | GET / DELETE | other methods |
//! |-----------------------|--------------|---------------|
//! | Registered            | next         | next          |
//! | Warned / Suspended    | next         | 409           |
//! | Unregistered, Deleted | 400          | 400           |
//! | anything else         | 500          | 500           |
//!
//! On `next`, the request carries a [`SubscriptionCtx`] in its extensions.
//! State semantics follow the ARM resource-provider subscription lifecycle contract.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{RawPathParams, State, rejection::RawPathParamsRejection},
    http::{Method, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::SubscriptionCtx;
use crate::error::{
    AppError, CLOUD_ERROR_CODE_INVALID_PARAMETER, CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE,
};
use crate::services::metrics::MetricsEmitter;
use crate::services::subscriptions::{SubscriptionCache, SubscriptionState};

/// Path parameter holding the subscription id.
pub const PATH_SEGMENT_SUBSCRIPTION_ID: &str = "subscriptionid";

pub const SUBSCRIPTION_LIFECYCLE_METRIC: &str = "subscription_lifecycle";

fn missing_parameter_message(name: &str) -> String {
    format!("The request is missing required parameter '{name}'.")
}

fn unregistered_subscription_message(subscription_id: &str) -> String {
    format!("Request is not allowed in unregistered subscription '{subscription_id}'.")
}

fn invalid_subscription_state_message(state: &SubscriptionState) -> String {
    format!("Request is not allowed in subscription in state '{state}'.")
}

/// Validates subscription existence and lifecycle state.
///
/// All collaborators are injected and immutable; clones share them.
#[derive(Clone)]
pub struct SubscriptionStateValidator {
    cache: Arc<dyn SubscriptionCache>,
    metrics: Arc<dyn MetricsEmitter>,
    region: Arc<str>,
}

impl SubscriptionStateValidator {
    pub fn new(
        cache: Arc<dyn SubscriptionCache>,
        metrics: Arc<dyn MetricsEmitter>,
        region: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            cache,
            metrics,
            region: region.into(),
        }
    }

    /// Decide whether a request may proceed.
    ///
    /// Returns the context to attach to the request on success, or the
    /// error response to send instead.
    pub fn validate(
        &self,
        subscription_id: Option<&str>,
        method: &Method,
    ) -> Result<SubscriptionCtx, AppError> {
        let Some(subscription_id) = subscription_id.filter(|id| !id.is_empty()) else {
            return Err(AppError::bad_request(
                CLOUD_ERROR_CODE_INVALID_PARAMETER,
                missing_parameter_message(PATH_SEGMENT_SUBSCRIPTION_ID),
            )
            .with_target(PATH_SEGMENT_SUBSCRIPTION_ID));
        };

        let Some(subscription) = self.cache.get_subscription(subscription_id) else {
            return Err(unregistered(subscription_id));
        };

        self.emit_lifecycle_gauge(subscription_id, &subscription.state);

        match &subscription.state {
            SubscriptionState::Registered => {}
            SubscriptionState::Unregistered => return Err(unregistered(subscription_id)),
            SubscriptionState::Warned | SubscriptionState::Suspended => {
                if method != Method::GET && method != Method::DELETE {
                    return Err(AppError::conflict(
                        CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE,
                        invalid_subscription_state_message(&subscription.state),
                    ));
                }
            }
            SubscriptionState::Deleted => {
                return Err(AppError::bad_request(
                    CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE,
                    invalid_subscription_state_message(&subscription.state),
                ));
            }
            SubscriptionState::Unrecognized(raw) => {
                tracing::error!(
                    subscription_id,
                    state = %raw,
                    "subscription is in an unrecognized lifecycle state"
                );
                return Err(AppError::Internal);
            }
        }

        Ok(SubscriptionCtx::new(subscription_id, subscription.state))
    }

    fn emit_lifecycle_gauge(&self, subscription_id: &str, state: &SubscriptionState) {
        self.metrics.emit_gauge(
            SUBSCRIPTION_LIFECYCLE_METRIC,
            1.0,
            &[
                ("region", &*self.region),
                ("subscriptionid", subscription_id),
                ("state", state.as_str()),
            ],
        );
    }
}

fn unregistered(subscription_id: &str) -> AppError {
    AppError::bad_request(
        CLOUD_ERROR_CODE_INVALID_SUBSCRIPTION_STATE,
        unregistered_subscription_message(subscription_id),
    )
}

/// Gate the given routes on subscription state.
///
/// `route_layer` なので、マッチしたルートにだけ掛かる (path params が取れる状態で実行される)。
///
/// ```ignore
/// let scoped = middleware::subscription_state::apply(scoped, state.subscription_validator.clone());
/// ```
pub fn apply<S>(router: Router<S>, validator: SubscriptionStateValidator) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        validator,
        subscription_state_middleware,
    ))
}

async fn subscription_state_middleware(
    State(validator): State<SubscriptionStateValidator>,
    params: Result<RawPathParams, RawPathParamsRejection>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let subscription_id = params.as_ref().ok().and_then(|params| {
        params
            .iter()
            .find(|(key, _)| *key == PATH_SEGMENT_SUBSCRIPTION_ID)
            .map(|(_, value)| value)
    });

    let ctx = match validator.validate(subscription_id, req.method()) {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::warn!(
                subscription_id = subscription_id.unwrap_or_default(),
                method = %req.method(),
                status = %err.status(),
                code = err.code(),
                "request rejected by subscription state gate"
            );
            return Err(err);
        }
    };

    tracing::debug!(
        subscription_id = %ctx.subscription_id,
        state = %ctx.state,
        "subscription state allows request"
    );

    // middleware → extractor への受け渡し
    ctx.attach(req.extensions_mut());

    Ok(next.run(req).await)
}
