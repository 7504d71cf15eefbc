//! Types shared across the back office crates.

pub mod types;

pub use types::{DayWindow, Entity, ResultLimit, WindowError};
