pub mod subscription_ctx;

pub use subscription_ctx::{SubscriptionCtx, SubscriptionCtxExtractor};
