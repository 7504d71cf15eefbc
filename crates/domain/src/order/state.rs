//! Order status state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DomainError;

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► Shipped ──► Delivered
///    │           │
///    │           └──────► Cancelled
///    ├──────────────────► Delivered
///    └──────────────────► Cancelled
/// ```
/// Delivered and Cancelled are terminal. A non-terminal order may be
/// "moved" to its current status, which only touches `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Reasons the status guard rejects a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cancelled orders cannot be updated")]
    Cancelled,

    #[error("delivered orders cannot be updated")]
    Delivered,

    #[error("shipped orders cannot go back to pending status")]
    ShippedToPending,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Checks whether an order in this status may move to `next`.
    pub fn check_transition(&self, next: OrderStatus) -> Result<(), TransitionError> {
        match (self, next) {
            (OrderStatus::Cancelled, _) => Err(TransitionError::Cancelled),
            (OrderStatus::Delivered, _) => Err(TransitionError::Delivered),
            (OrderStatus::Shipped, OrderStatus::Pending) => Err(TransitionError::ShippedToPending),
            _ => Ok(()),
        }
    }

    /// Returns the status name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_pending_may_move_anywhere() {
        for next in OrderStatus::ALL {
            assert!(OrderStatus::Pending.check_transition(next).is_ok());
        }
    }

    #[test]
    fn test_shipped_moves_forward_or_cancels() {
        assert!(OrderStatus::Shipped.check_transition(OrderStatus::Shipped).is_ok());
        assert!(OrderStatus::Shipped.check_transition(OrderStatus::Delivered).is_ok());
        assert!(OrderStatus::Shipped.check_transition(OrderStatus::Cancelled).is_ok());
        assert_eq!(
            OrderStatus::Shipped.check_transition(OrderStatus::Pending),
            Err(TransitionError::ShippedToPending)
        );
    }

    #[test]
    fn test_terminal_states_reject_every_target() {
        for next in OrderStatus::ALL {
            assert_eq!(
                OrderStatus::Cancelled.check_transition(next),
                Err(TransitionError::Cancelled)
            );
            assert_eq!(
                OrderStatus::Delivered.check_transition(next),
                Err(TransitionError::Delivered)
            );
        }
    }

    #[test]
    fn test_parse_known_and_unknown_values() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(
            "Returned".parse::<OrderStatus>(),
            Err(DomainError::UnknownStatus("Returned".into()))
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_transition_messages() {
        assert_eq!(
            TransitionError::ShippedToPending.to_string(),
            "shipped orders cannot go back to pending status"
        );
        assert_eq!(
            TransitionError::Cancelled.to_string(),
            "cancelled orders cannot be updated"
        );
        assert_eq!(
            TransitionError::Delivered.to_string(),
            "delivered orders cannot be updated"
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&OrderStatus::Delivered).unwrap();
        assert_eq!(json, "\"Delivered\"");
        let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }
}
