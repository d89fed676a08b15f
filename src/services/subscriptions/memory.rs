use std::sync::Arc;

use dashmap::DashMap;

use crate::services::subscriptions::cache::SubscriptionCache;
use crate::services::subscriptions::types::Subscription;

/// In-process subscription cache.
///
/// Seeded from config at startup. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct InMemorySubscriptionCache {
    entries: Arc<DashMap<String, Subscription>>,
}

impl InMemorySubscriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let cache = Self::new();
        for sub in subscriptions {
            cache.upsert(sub);
        }
        cache
    }

    pub fn upsert(&self, subscription: Subscription) {
        self.entries.insert(subscription.id.clone(), subscription);
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl SubscriptionCache for InMemorySubscriptionCache {
    fn get_subscription(&self, id: &str) -> Option<Subscription> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::subscriptions::types::SubscriptionState;

    #[test]
    fn lookup_returns_latest_state() {
        let cache = InMemorySubscriptionCache::new();
        cache.upsert(Subscription::new("sub-1", SubscriptionState::Registered));
        cache.upsert(Subscription::new("sub-1", SubscriptionState::Suspended));

        let sub = cache.get_subscription("sub-1").expect("subscription");
        assert_eq!(sub.state, SubscriptionState::Suspended);
        assert_eq!(cache.count(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let cache = InMemorySubscriptionCache::new();
        let other = cache.clone();
        other.upsert(Subscription::new("sub-2", SubscriptionState::Warned));

        assert!(cache.get_subscription("sub-2").is_some());
        assert!(cache.get_subscription("sub-3").is_none());
    }
}
