use common::Entity;
use domain::{DomainError, TransitionError};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors returned by the repositories.
///
/// Raw `sqlx` errors are classified at the repository boundary; callers
/// match on these variants and never on message text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A point lookup found no row, or a referenced parent row is missing.
    #[error("{0} not found")]
    NotFound(Entity),

    /// A uniqueness constraint was violated.
    #[error("duplicate key")]
    DuplicateKey,

    /// The row cannot be deleted while other rows reference it.
    #[error("{0} is still referenced by other records")]
    Referenced(Entity),

    /// The input failed validation before reaching the database.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The order status guard rejected the requested move.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// An unclassified database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

enum Violation {
    Missing,
    Unique,
    ForeignKey(Option<Entity>),
}

fn violation(err: &sqlx::Error) -> Option<Violation> {
    match err {
        sqlx::Error::RowNotFound => Some(Violation::Missing),
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation => Some(Violation::Unique),
            ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey(
                db_err.constraint().and_then(parent_of_constraint),
            )),
            _ => None,
        },
        _ => None,
    }
}

/// True for Postgres `numeric_value_out_of_range` (SQLSTATE 22003).
pub(crate) fn is_out_of_range(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("22003"),
        _ => false,
    }
}

/// Maps a foreign key constraint (see `migrations/`) to the parent it points at.
pub(crate) fn parent_of_constraint(constraint: &str) -> Option<Entity> {
    match constraint {
        "fk_contacts_customer" | "fk_quotations_customer" | "fk_orders_customer" => {
            Some(Entity::Customer)
        }
        "fk_inventory_product" | "fk_quotation_items_product" | "fk_order_items_product" => {
            Some(Entity::Product)
        }
        "fk_orders_quotation" | "fk_quotation_items_quotation" => Some(Entity::Quotation),
        "fk_order_items_order" => Some(Entity::Order),
        _ => None,
    }
}

impl StoreError {
    /// Classifies an error from a read, insert, or update on `entity`.
    ///
    /// A missing row becomes `NotFound(entity)`; a foreign key violation
    /// becomes `NotFound` of the parent named by the violated constraint.
    pub fn classify(err: sqlx::Error, entity: Entity) -> Self {
        match violation(&err) {
            Some(Violation::Missing) => StoreError::NotFound(entity),
            Some(Violation::Unique) => StoreError::DuplicateKey,
            Some(Violation::ForeignKey(parent)) => StoreError::NotFound(parent.unwrap_or(entity)),
            None => StoreError::Database(err),
        }
    }

    /// Classifies an error from a delete on `entity`, where a foreign key
    /// violation means a child row still points at it.
    pub fn classify_delete(err: sqlx::Error, entity: Entity) -> Self {
        match violation(&err) {
            Some(Violation::ForeignKey(_)) => StoreError::Referenced(entity),
            _ => Self::classify(err, entity),
        }
    }

    /// Returns true for the `DuplicateKey` sentinel.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey)
    }
}

/// `map_err` shorthands for `sqlx` results.
pub(crate) trait Classify<T> {
    fn classify(self, entity: Entity) -> Result<T>;
    fn classify_delete(self, entity: Entity) -> Result<T>;
}

impl<T> Classify<T> for std::result::Result<T, sqlx::Error> {
    fn classify(self, entity: Entity) -> Result<T> {
        self.map_err(|e| StoreError::classify(e, entity))
    }

    fn classify_delete(self, entity: Entity) -> Result<T> {
        self.map_err(|e| StoreError::classify_delete(e, entity))
    }
}
