//! PostgreSQL persistence for the sales back office.
//!
//! Every repository is constructed from an explicit [`sqlx::PgPool`] and
//! funnels database failures through [`StoreError::classify`].

pub mod contacts;
pub mod customers;
pub mod db;
pub mod error;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod quotations;
pub mod users;

pub use contacts::ContactRepository;
pub use customers::CustomerRepository;
pub use error::{Result, StoreError};
pub use inventory::InventoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use quotations::QuotationRepository;
pub use users::UserRepository;

use sqlx::PgPool;

/// One handle per repository, all sharing the same pool.
#[derive(Clone)]
pub struct Repositories {
    pub customers: CustomerRepository,
    pub contacts: ContactRepository,
    pub products: ProductRepository,
    pub inventory: InventoryRepository,
    pub quotations: QuotationRepository,
    pub orders: OrderRepository,
    pub users: UserRepository,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            inventory: InventoryRepository::new(pool.clone()),
            quotations: QuotationRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
