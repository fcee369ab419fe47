//! Ticket construction.

use chrono::{DateTime, Utc};

use super::{OrderStatus, OrderTicket, Recipe};

/// Order number given to the first ticket of a session.
pub const FIRST_ORDER_NUMBER: u32 = 101;

/// Next order number for the given tickets: one past the highest, or
/// [`FIRST_ORDER_NUMBER`] when there are none.
pub fn next_order_number(tickets: &[OrderTicket]) -> u32 {
    tickets
        .iter()
        .map(|t| t.order_number)
        .max()
        .map_or(FIRST_ORDER_NUMBER, |max| max + 1)
}

/// Build a new pending ticket for `recipe`.
///
/// Does not touch the store; the caller appends the result.
pub fn create_ticket(tickets: &[OrderTicket], recipe: Recipe, now: DateTime<Utc>) -> OrderTicket {
    OrderTicket {
        id: uuid::Uuid::new_v4().to_string(),
        order_number: next_order_number(tickets),
        recipe,
        status: OrderStatus::Pending,
        timestamp: now,
    }
}
