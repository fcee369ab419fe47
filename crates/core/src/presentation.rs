//! Display metadata and formatting helpers for rendering tickets.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::order::OrderStatus;

/// Visual category a display uses to style a ticket.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Needs a cook's attention.
    Attention,
    InProgress,
    Done,
    /// Fallback for values outside the known statuses.
    Unknown,
}

/// Label and category for one status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub category: StatusCategory,
}

const UNKNOWN_DISPLAY: StatusDisplay = StatusDisplay {
    label: "Unknown",
    category: StatusCategory::Unknown,
};

/// Display metadata for a known status.
pub fn status_display(status: OrderStatus) -> StatusDisplay {
    match status {
        OrderStatus::Pending => StatusDisplay {
            label: "Pending",
            category: StatusCategory::Attention,
        },
        OrderStatus::Preparing => StatusDisplay {
            label: "Preparing",
            category: StatusCategory::InProgress,
        },
        OrderStatus::Completed => StatusDisplay {
            label: "Completed",
            category: StatusCategory::Done,
        },
    }
}

/// Display metadata for a raw status value. Never fails: unrecognized
/// values get the `Unknown` fallback.
pub fn status_display_raw(raw: &str) -> StatusDisplay {
    OrderStatus::parse(raw).map_or(UNKNOWN_DISPLAY, status_display)
}

/// `101` -> `"#101"`.
pub fn format_order_number(order_number: u32) -> String {
    format!("#{}", order_number)
}

/// Compact age of a ticket: `"just now"`, `"7m"` or `"2h 05m"`.
pub fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - since).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let minutes = secs / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Wall-clock time of day, `"HH:MM"` (UTC).
pub fn format_clock(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}
