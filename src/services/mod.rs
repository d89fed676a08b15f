pub mod metrics;
pub mod subscriptions;
