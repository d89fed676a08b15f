/*
 * Responsibility
 * - Handler から見える「検証済み subscription コンテキスト」の型
 * - middleware (subscription_state) が request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - extensions は型で key されるので、この型自体が衝突しない key になる
 * - 一度 insert したら書き換えない (immutable な request-scoped annotation)
 */
use axum::http::Extensions;
use serde::Serialize;

use crate::services::subscriptions::SubscriptionState;

/// Subscription that passed (or is being checked by) the state gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCtx {
    pub subscription_id: String,
    #[serde(serialize_with = "serialize_state")]
    pub state: SubscriptionState,
}

impl SubscriptionCtx {
    pub fn new(subscription_id: impl Into<String>, state: SubscriptionState) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            state,
        }
    }

    pub fn attach(self, extensions: &mut Extensions) {
        extensions.insert(self);
    }

    pub fn from_extensions(extensions: &Extensions) -> Option<&Self> {
        extensions.get::<Self>()
    }
}

fn serialize_state<S>(state: &SubscriptionState, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(state.as_str())
}
