use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of persisted records.
///
/// Used to name the record in "not found" conditions so callers can
/// produce entity-specific messages without inspecting error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Contact,
    Product,
    Inventory,
    Quotation,
    QuotationItem,
    Order,
    OrderItem,
    User,
}

impl Entity {
    /// Returns the human readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customer => "customer",
            Entity::Contact => "contact",
            Entity::Product => "product",
            Entity::Inventory => "inventory",
            Entity::Quotation => "quotation",
            Entity::QuotationItem => "quotation item",
            Entity::Order => "order",
            Entity::OrderItem => "order item",
            Entity::User => "user",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a report parameter is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be between 1 and {max} (got {value})")]
pub struct WindowError {
    pub field: &'static str,
    pub value: i64,
    pub max: i64,
}

/// A look-back window in whole days, ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayWindow(i64);

impl DayWindow {
    pub const MAX: i64 = 3650;

    /// Default window for sales trends and the dashboard.
    pub const TREND_DEFAULT: DayWindow = DayWindow(7);

    /// Default window for customer rankings.
    pub const RANKING_DEFAULT: DayWindow = DayWindow(365);

    /// Creates a window, rejecting values outside `1..=MAX`.
    pub fn new(days: i64) -> Result<Self, WindowError> {
        if (1..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(WindowError {
                field: "days",
                value: days,
                max: Self::MAX,
            })
        }
    }

    /// Resolves an optional query parameter against an endpoint default.
    pub fn or_default(days: Option<i64>, default: DayWindow) -> Result<Self, WindowError> {
        match days {
            Some(days) => Self::new(days),
            None => Ok(default),
        }
    }

    pub fn days(&self) -> i64 {
        self.0
    }
}

/// Maximum number of rows a ranking report returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLimit(i64);

impl ResultLimit {
    pub const MAX: i64 = 100;

    /// Top-customer count shown on the dashboard.
    pub const DASHBOARD_DEFAULT: ResultLimit = ResultLimit(5);

    /// Top-customer count for the standalone report.
    pub const REPORT_DEFAULT: ResultLimit = ResultLimit(10);

    pub fn new(limit: i64) -> Result<Self, WindowError> {
        if (1..=Self::MAX).contains(&limit) {
            Ok(Self(limit))
        } else {
            Err(WindowError {
                field: "limit",
                value: limit,
                max: Self::MAX,
            })
        }
    }

    pub fn or_default(limit: Option<i64>, default: ResultLimit) -> Result<Self, WindowError> {
        match limit {
            Some(limit) => Self::new(limit),
            None => Ok(default),
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}
