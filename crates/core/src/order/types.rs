//! Core order data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A meal and its preparation steps, as delivered by the stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    /// Meal name shown on the ticket.
    pub meal: String,
    /// Ordered preparation instructions.
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(meal: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            meal: meal.into(),
            steps,
        }
    }
}

/// Where a ticket is in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for a cook to pick it up.
    Pending,
    /// Being cooked.
    Preparing,
    /// Done. Terminal.
    Completed,
}

impl OrderStatus {
    /// All statuses, in board order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Completed,
    ];

    /// Returns the status as a string (for filtering and labels).
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
        }
    }

    /// Parse a raw status value. Returns `None` for anything outside the three statuses.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order on the kitchen board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderTicket {
    /// Unique identifier (UUID).
    pub id: String,

    /// Human-facing order number, starting at 101.
    pub order_number: u32,

    /// The recipe this order is for.
    pub recipe: Recipe,

    /// Current status. The only field that changes after creation.
    pub status: OrderStatus,

    /// When the ticket was created.
    pub timestamp: DateTime<Utc>,
}
