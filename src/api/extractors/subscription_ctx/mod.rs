/*!
 * Subscription context extractor
 *
 * Responsibility:
 * - subscription state gate を通過したリクエストのコンテキスト (SubscriptionCtx) を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - SubscriptionCtx
 * - SubscriptionCtxExtractor
 */

mod core;
mod types;

pub use core::SubscriptionCtxExtractor;
pub use types::SubscriptionCtx;
