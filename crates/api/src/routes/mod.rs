pub mod contacts;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;
pub mod products;
pub mod quotations;
pub mod reports;
pub mod users;
