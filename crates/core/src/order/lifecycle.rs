//! Status transitions driven by staff actions.

use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// A staff action on a ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    /// pending -> preparing.
    StartCooking,
    /// preparing -> pending.
    Pause,
    /// Flip between pending and preparing (the display's single toggle control).
    Toggle,
    /// pending/preparing -> completed.
    Complete,
}

impl StatusAction {
    /// Status after applying this action to `current`.
    ///
    /// Total over every input. Completed tickets stay completed.
    pub fn apply(self, current: OrderStatus) -> OrderStatus {
        if current.is_terminal() {
            return current;
        }
        match (self, current) {
            (StatusAction::Complete, _) => OrderStatus::Completed,
            (StatusAction::StartCooking, _) => OrderStatus::Preparing,
            (StatusAction::Pause, _) => OrderStatus::Pending,
            (StatusAction::Toggle, OrderStatus::Pending) => OrderStatus::Preparing,
            (StatusAction::Toggle, _) => OrderStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::StartCooking => "start_cooking",
            StatusAction::Pause => "pause",
            StatusAction::Toggle => "toggle",
            StatusAction::Complete => "complete",
        }
    }
}

/// Actions the display offers for a ticket in `status`.
pub fn available_actions(status: OrderStatus) -> &'static [StatusAction] {
    if status.is_terminal() {
        &[]
    } else {
        &[StatusAction::Toggle, StatusAction::Complete]
    }
}

/// Result of applying an action to a ticket.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Transition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl Transition {
    /// Returns true if the status actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// Returns true if this transition just completed the ticket.
    pub fn completed(&self) -> bool {
        self.changed() && self.to == OrderStatus::Completed
    }
}
