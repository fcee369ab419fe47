//! Order tickets and the in-memory order store.

mod board;
mod factory;
mod lifecycle;
mod store;
mod types;

pub use board::{BoardCounts, OrderBoard};
pub use factory::{create_ticket, next_order_number, FIRST_ORDER_NUMBER};
pub use lifecycle::{available_actions, StatusAction, Transition};
pub use store::{OrderError, OrderStore};
pub use types::{OrderStatus, OrderTicket, Recipe};
