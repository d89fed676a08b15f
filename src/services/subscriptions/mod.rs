pub mod cache;
pub mod memory;
pub mod types;

pub use cache::SubscriptionCache;
pub use memory::InMemorySubscriptionCache;
pub use types::{Subscription, SubscriptionState};
