//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for an order.
///
/// Orders are owned by the external store; the processor echoes the id
/// verbatim in callbacks, so it is kept as an opaque non-empty string rather
/// than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an OrderId from a raw string, rejecting empty values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::empty_field("order_id"));
        }
        Ok(Self(raw))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for a reconciliation attempt, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReconciliationId(Uuid);

impl ReconciliationId {
    /// Creates a new random ReconciliationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReconciliationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReconciliationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_accepts_numeric_strings() {
        let id = OrderId::new("1042").unwrap();
        assert_eq!(id.as_str(), "1042");
        assert_eq!(id.to_string(), "1042");
    }

    #[test]
    fn order_id_rejects_empty() {
        assert!(OrderId::new("").is_err());
        assert!(OrderId::new("   ").is_err());
    }

    #[test]
    fn order_id_parses_from_str() {
        let id: OrderId = "ord-7".parse().unwrap();
        assert_eq!(id.as_str(), "ord-7");
    }

    #[test]
    fn reconciliation_ids_are_unique() {
        assert_ne!(ReconciliationId::new(), ReconciliationId::new());
    }
}
