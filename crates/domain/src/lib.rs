//! Domain layer for the sales back office.
//!
//! This crate holds the plain data model and the rules that do not need a
//! database to evaluate:
//! - input validation for every writable entity
//! - the order status state machine and its transition guard
//! - default filling for new quotations
//! - password hashing for user accounts

pub mod contact;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod order;
pub mod product;
pub mod quotation;
pub mod user;
mod validate;

pub use contact::{Contact, NewContact};
pub use customer::{Customer, NewCustomer};
pub use error::DomainError;
pub use inventory::{Inventory, NewInventory, Restock, StockLevels};
pub use order::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderWithItems, TransitionError,
    UpdateOrder,
};
pub use product::{NewProduct, Product};
pub use quotation::{
    NewQuotation, NewQuotationItem, Quotation, QuotationDraft, QuotationItem, QuotationWithItems,
    DEFAULT_QUOTATION_STATUS, QUOTATION_VALIDITY_DAYS,
};
pub use user::{NewUser, PasswordHash, UpdateUser, User};
