//! Subscription lookup interface used by the subscription state gate.
use crate::services::subscriptions::types::Subscription;

/// Read-only view of the subscriptions known to this RP.
///
/// Population and refresh belong to the registration subsystem; the
/// frontend only reads. Implementations must be safe to call from many
/// request tasks at once.
pub trait SubscriptionCache: Send + Sync + 'static {
    // Returns the subscription if the id is known.
    fn get_subscription(&self, id: &str) -> Option<Subscription>;
}
