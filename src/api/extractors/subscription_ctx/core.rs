use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::SubscriptionCtx;

/// Handler で SubscriptionCtx を受け取るための extractor
/// subscription_state middleware が extensions に insert 済みである前提
/// 見つからない場合は middleware の配線漏れなので 500 を返す
pub struct SubscriptionCtxExtractor(pub SubscriptionCtx);

impl FromRequestParts<AppState> for SubscriptionCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match SubscriptionCtx::from_extensions(&parts.extensions) {
            Some(ctx) => Ok(SubscriptionCtxExtractor(ctx.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "subscription context missing; is the subscription state middleware applied?"
                );
                Err(AppError::Internal)
            }
        }
    }
}
