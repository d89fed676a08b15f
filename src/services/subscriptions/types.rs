/*
 * Responsibility
 * - Subscription / SubscriptionState の型 (契約)
 * - ARM から届く state 文字列 ⇔ enum の変換
 *
 * Notes
 * - state は外部の registration 側が書き込む値なので、未知の文字列も
 *   Unrecognized として保持する (黙って Registered 扱いにしない)
 */
use std::fmt;

/// Lifecycle state of a subscription as reported by ARM.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubscriptionState {
    Registered,
    Unregistered,
    Warned,
    Suspended,
    Deleted,
    /// A value outside the ARM lifecycle set. Carries the raw string for logging.
    Unrecognized(String),
}

impl SubscriptionState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "Registered",
            Self::Unregistered => "Unregistered",
            Self::Warned => "Warned",
            Self::Suspended => "Suspended",
            Self::Deleted => "Deleted",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for SubscriptionState {
    fn from(value: &str) -> Self {
        match value {
            "Registered" => Self::Registered,
            "Unregistered" => Self::Unregistered,
            "Warned" => Self::Warned,
            "Suspended" => Self::Suspended,
            "Deleted" => Self::Deleted,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub state: SubscriptionState,
}

impl Subscription {
    pub fn new(id: impl Into<String>, state: SubscriptionState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}
