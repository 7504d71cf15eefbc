//! Quotations and their line items.
//!
//! Unlike orders, quotation status is free-form text with no transition
//! guard.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DomainError;
use crate::validate;

/// Status given to quotations created without one.
pub const DEFAULT_QUOTATION_STATUS: &str = "PENDING";

/// Days a quotation stays valid when no validity date is supplied.
pub const QUOTATION_VALIDITY_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: i64,
    pub customer_id: i64,
    pub quote_date: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationItem {
    pub id: i64,
    pub quotation_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationWithItems {
    pub quotation: Quotation,
    pub items: Vec<QuotationItem>,
}

/// Header fields for a new or replaced quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewQuotation {
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub quote_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_amount: Decimal,
}

/// A line on a new quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewQuotationItem {
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
}

impl NewQuotationItem {
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

/// A quotation header with every default filled in, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationDraft {
    pub customer_id: i64,
    pub quote_date: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
}

impl QuotationDraft {
    /// Header total to store once the items are written.
    ///
    /// A zero total with at least one stored line becomes the sum of the
    /// lines' database-computed totals. Returns `None` when the requested
    /// total stands.
    pub fn total_from_lines(&self, lines: &[QuotationItem]) -> Option<Decimal> {
        if self.total_amount.is_zero() && !lines.is_empty() {
            Some(lines.iter().map(|line| line.line_total).sum())
        } else {
            None
        }
    }
}

impl NewQuotation {
    /// Field checks that do not depend on the stored quote date.
    pub fn validate(&self, items: &[NewQuotationItem]) -> Result<(), DomainError> {
        validate::positive_id("customer_id", self.customer_id)?;
        validate::non_negative_amount("total_amount", self.total_amount)?;
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(())
    }

    /// Validates the request and fills header defaults:
    /// - quote date falls back to `default_quote_date` (now on create, the
    ///   stored date on update)
    /// - validity date falls back to quote date + 30 days
    /// - empty status becomes `PENDING`
    ///
    /// The total is settled after the items are stored, see
    /// [`QuotationDraft::total_from_lines`].
    pub fn resolve(
        &self,
        items: &[NewQuotationItem],
        default_quote_date: DateTime<Utc>,
    ) -> Result<QuotationDraft, DomainError> {
        self.validate(items)?;

        let quote_date = self.quote_date.unwrap_or(default_quote_date);
        let valid_until = self
            .valid_until
            .unwrap_or(quote_date + Duration::days(QUOTATION_VALIDITY_DAYS));
        if valid_until < quote_date {
            return Err(DomainError::invalid(
                "valid_until",
                "must not be before quote_date",
            ));
        }

        let status = match self.status.trim() {
            "" => DEFAULT_QUOTATION_STATUS.to_string(),
            status => status.to_string(),
        };

        Ok(QuotationDraft {
            customer_id: self.customer_id,
            quote_date,
            valid_until,
            status,
            total_amount: self.total_amount,
        })
    }
}

/// Checks a free-form status supplied to the status endpoint.
pub fn validate_status(status: &str) -> Result<(), DomainError> {
    validate::required_text("status", status)
}
