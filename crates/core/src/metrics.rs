//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Recipe stream (events received, dropped payloads, connection errors)
//! - Display loop (commands processed)

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Stream Metrics
// =============================================================================

/// Events received from the recipe stream.
pub static STREAM_EVENTS_RECEIVED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "kitchen_stream_events_received_total",
        "Total events received from the recipe stream",
    )
    .unwrap()
});

/// Events dropped because their payload could not be decoded.
pub static STREAM_EVENTS_DROPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kitchen_stream_events_dropped_total",
            "Stream events dropped before reaching the board",
        ),
        &["reason"], // "invalid_json", "missing_meal", "blank_meal", "unhandled_event"
    )
    .unwrap()
});

/// Stream connection failures.
pub static STREAM_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("kitchen_stream_errors_total", "Recipe stream failures"),
        &["kind"], // "connect", "status", "transport", "disconnected"
    )
    .unwrap()
});

// =============================================================================
// Display Metrics
// =============================================================================

/// Commands processed by the display loop.
pub static DISPLAY_COMMANDS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "kitchen_display_commands_total",
            "Commands processed by the display loop",
        ),
        &["command"],
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Stream
        Box::new(STREAM_EVENTS_RECEIVED.clone()),
        Box::new(STREAM_EVENTS_DROPPED.clone()),
        Box::new(STREAM_ERRORS.clone()),
        // Display
        Box::new(DISPLAY_COMMANDS.clone()),
    ]
}
