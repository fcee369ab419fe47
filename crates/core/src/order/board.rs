//! The three derived views of the store.

use serde::Serialize;

use super::{OrderStatus, OrderStore, OrderTicket};

/// Number of tickets in each view.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct BoardCounts {
    pub pending: usize,
    pub preparing: usize,
    pub completed: usize,
    pub total: usize,
}

/// Tickets grouped by status, each group in arrival order.
///
/// Every ticket in the store appears in exactly one group.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OrderBoard {
    pub pending: Vec<OrderTicket>,
    pub preparing: Vec<OrderTicket>,
    pub completed: Vec<OrderTicket>,
}

impl OrderBoard {
    /// Derive the board from the current store contents.
    pub fn from_store(store: &OrderStore) -> Self {
        let collect = |status: OrderStatus| -> Vec<OrderTicket> {
            store.with_status(status).cloned().collect()
        };
        Self {
            pending: collect(OrderStatus::Pending),
            preparing: collect(OrderStatus::Preparing),
            completed: collect(OrderStatus::Completed),
        }
    }

    /// Tickets with the given status.
    pub fn group(&self, status: OrderStatus) -> &[OrderTicket] {
        match status {
            OrderStatus::Pending => &self.pending,
            OrderStatus::Preparing => &self.preparing,
            OrderStatus::Completed => &self.completed,
        }
    }

    /// Find a ticket in any group.
    pub fn find(&self, id: &str) -> Option<&OrderTicket> {
        OrderStatus::ALL
            .iter()
            .flat_map(|status| self.group(*status))
            .find(|t| t.id == id)
    }

    pub fn counts(&self) -> BoardCounts {
        BoardCounts {
            pending: self.pending.len(),
            preparing: self.preparing.len(),
            completed: self.completed.len(),
            total: self.pending.len() + self.preparing.len() + self.completed.len(),
        }
    }
}
