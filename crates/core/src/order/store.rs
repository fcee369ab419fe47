//! In-memory order store.

use thiserror::Error;

use super::{OrderStatus, OrderTicket, StatusAction, Transition};

/// Error type for order store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
}

/// Ordered collection of tickets for the current session.
///
/// Owned by a single writer. Tickets are kept in arrival order and are
/// never removed.
#[derive(Debug, Default, Clone)]
pub struct OrderStore {
    tickets: Vec<OrderTicket>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly created ticket.
    pub fn append(&mut self, ticket: OrderTicket) {
        self.tickets.push(ticket);
    }

    /// Set a ticket's status and report the transition.
    ///
    /// A completed ticket is never reopened: the call leaves it completed
    /// and returns an unchanged transition.
    pub fn update_status(
        &mut self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Transition, OrderError> {
        let ticket = self.find_mut(id)?;
        let from = ticket.status;
        let to = if from.is_terminal() { from } else { status };
        ticket.status = to;
        Ok(Transition { from, to })
    }

    /// Apply a staff action to a ticket and report the transition.
    pub fn apply_action(
        &mut self,
        id: &str,
        action: StatusAction,
    ) -> Result<Transition, OrderError> {
        let from = self.find_mut(id)?.status;
        self.update_status(id, action.apply(from))
    }

    /// Get a ticket by ID.
    pub fn get(&self, id: &str) -> Option<&OrderTicket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// All tickets in arrival order.
    pub fn list(&self) -> &[OrderTicket] {
        &self.tickets
    }

    /// Tickets with the given status, in arrival order.
    pub fn with_status(&self, status: OrderStatus) -> impl Iterator<Item = &OrderTicket> {
        self.tickets.iter().filter(move |t| t.status == status)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut OrderTicket, OrderError> {
        self.tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}
