//! Collaborator seams consumed by the core.
//!
//! All external lookups are synchronous calls against injected
//! implementations; the core owns no retry policy for any of them.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configuration value as exposed by a [`ConfigProvider`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    /// Returns the boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Key-based configuration lookup for risk thresholds and payout flags.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<ConfigValue>;
}

/// Destination address validation for payout settlement.
pub trait AddressValidator: Send + Sync {
    fn is_valid(&self, address: &str) -> bool;
}

/// Event pushed to an injected notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyEvent {
    pub event_type: String,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl NotifyEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Single-capability notification seam.
///
/// Delivery failures are logged by the caller and never retried by the core.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    /// Returns error if delivery fails; the caller logs and moves on.
    async fn notify(&self, event: NotifyEvent) -> Result<()>;
}
