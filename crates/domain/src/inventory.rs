//! Stock levels per product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub current_stock: i32,
    pub reorder_level: i32,
    pub last_restock_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInventory {
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub current_stock: i32,
    #[serde(default)]
    pub reorder_level: i32,
    #[serde(default)]
    pub last_restock_date: Option<DateTime<Utc>>,
}

impl NewInventory {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::positive_id("product_id", self.product_id)?;
        self.levels().validate()
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels {
            current_stock: self.current_stock,
            reorder_level: self.reorder_level,
        }
    }
}

/// Replacement stock figures for an existing inventory row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    #[serde(default)]
    pub current_stock: i32,
    #[serde(default)]
    pub reorder_level: i32,
}

impl StockLevels {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate::non_negative_count("current_stock", self.current_stock)?;
        validate::non_negative_count("reorder_level", self.reorder_level)
    }
}

/// Units received into stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restock {
    #[serde(default)]
    pub quantity: i32,
}

impl Restock {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::invalid("quantity", "must be positive"));
        }
        Ok(())
    }
}
