/*
 * Responsibility
 * - subscription-scoped な resource route の handler
 * - subscription gate を通過したリクエストだけが到達する (SubscriptionCtx を受け取る)
 *
 * Notes
 * - 実際の resource 操作 (cluster 作成など) は backend 側の責務。
 *   ここでは gate の結果と resource id を返すだけ
 */
use axum::{
    Json,
    http::{Method, Uri},
};
use serde::Serialize;

use crate::api::extractors::{SubscriptionCtx, SubscriptionCtxExtractor};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
    pub method: String,
    pub subscription: SubscriptionCtx,
}

#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub value: Vec<ResourceResponse>,
}

pub async fn resource(
    method: Method,
    uri: Uri,
    SubscriptionCtxExtractor(ctx): SubscriptionCtxExtractor,
) -> Json<ResourceResponse> {
    Json(ResourceResponse {
        id: uri.path().to_string(),
        method: method.to_string(),
        subscription: ctx,
    })
}

pub async fn list_resources(
    SubscriptionCtxExtractor(ctx): SubscriptionCtxExtractor,
) -> Json<ResourceListResponse> {
    tracing::debug!(
        subscription_id = %ctx.subscription_id,
        state = %ctx.state,
        "listing subscription-scoped resources"
    );
    Json(ResourceListResponse { value: Vec::new() })
}
