//! Order rows and the input shapes used to write them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::validate;

use super::OrderStatus;

/// A persisted order header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub quotation_id: Option<i64>,
    pub order_date: DateTime<Utc>,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted order line. `line_total` is computed by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
}

/// An order together with its lines, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Header fields for a new order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub quotation_id: Option<i64>,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipping_address: String,
    /// Raw status text; parsed by [`NewOrder::status`]. Defaults to Pending.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Decimal,
}

impl NewOrder {
    /// Resolves the requested initial status.
    pub fn status(&self) -> Result<OrderStatus, DomainError> {
        match self.status.as_deref() {
            None | Some("") => Ok(OrderStatus::default()),
            Some(raw) => raw.parse(),
        }
    }

    /// Checks the header and lines of a create request, returning the initial status.
    pub fn validate_with_items(&self, items: &[NewOrderItem]) -> Result<OrderStatus, DomainError> {
        validate::positive_id("customer_id", self.customer_id)?;
        if let Some(quotation_id) = self.quotation_id {
            validate::positive_id("quotation_id", quotation_id)?;
        }
        validate::non_negative_amount("total_amount", self.total_amount)?;
        let status = self.status()?;

        if items.is_empty() {
            return Err(DomainError::required("items"));
        }
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(status)
    }
}

/// A line on a new order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrderItem {
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
}

impl NewOrderItem {
    pub fn validate(&self, index: usize) -> Result<(), DomainError> {
        validate::line_item(
            index,
            self.product_id,
            self.quantity,
            self.unit_price,
            self.discount,
        )
    }
}

/// Replacement header fields. Status is deliberately absent: it only
/// changes through the guarded status operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrder {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub quotation_id: Option<i64>,
    /// Keeps the stored date when absent.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub total_amount: Decimal,
}

impl UpdateOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::positive_id("customer_id", self.customer_id)?;
        if let Some(quotation_id) = self.quotation_id {
            validate::positive_id("quotation_id", quotation_id)?;
        }
        validate::non_negative_amount("total_amount", self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(customer_id: i64) -> NewOrder {
        NewOrder {
            customer_id,
            shipping_address: "X".into(),
            ..Default::default()
        }
    }

    fn item(product_id: i64) -> NewOrderItem {
        NewOrderItem {
            product_id,
            quantity: 2,
            unit_price: Decimal::new(10, 0),
            discount: Decimal::ZERO,
        }
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        assert_eq!(order(5).status(), Ok(OrderStatus::Pending));
        let empty = NewOrder {
            status: Some(String::new()),
            ..order(5)
        };
        assert_eq!(empty.status(), Ok(OrderStatus::Pending));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let bad = NewOrder {
            status: Some("Lost".into()),
            ..order(5)
        };
        assert_eq!(
            bad.validate_with_items(&[item(1)]),
            Err(DomainError::UnknownStatus("Lost".into()))
        );
    }

    #[test]
    fn customer_is_required() {
        assert_eq!(
            order(0).validate_with_items(&[item(1)]),
            Err(DomainError::required("customer_id"))
        );
    }

    #[test]
    fn at_least_one_item_is_required() {
        assert_eq!(
            order(5).validate_with_items(&[]),
            Err(DomainError::required("items"))
        );
    }

    #[test]
    fn bad_item_is_reported_by_position() {
        let err = order(5)
            .validate_with_items(&[item(1), item(0)])
            .unwrap_err();
        assert_eq!(err.field(), Some("items[1].product_id"));
    }

    #[test]
    fn valid_request_yields_requested_status() {
        let shipped = NewOrder {
            status: Some("Shipped".into()),
            ..order(5)
        };
        assert_eq!(
            shipped.validate_with_items(&[item(1), item(2)]),
            Ok(OrderStatus::Shipped)
        );
    }

    #[test]
    fn update_rejects_negative_total() {
        let update = UpdateOrder {
            customer_id: 1,
            total_amount: Decimal::new(-100, 2),
            ..Default::default()
        };
        assert_eq!(update.validate().unwrap_err().field(), Some("total_amount"));
    }
}
