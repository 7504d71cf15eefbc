//! Orders, their line items, and the status lifecycle.

mod model;
mod state;

pub use model::{NewOrder, NewOrderItem, Order, OrderItem, OrderWithItems, UpdateOrder};
pub use state::{OrderStatus, TransitionError};
