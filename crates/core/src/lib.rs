pub mod config;
pub mod display;
pub mod metrics;
pub mod order;
pub mod presentation;
pub mod stream;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DisplayConfig,
    ServerConfig, StreamConfig,
};
pub use display::{
    create_display_system, ActionOutcome, BoardSnapshot, DisplayCommand, DisplayError,
    DisplayHandle, DisplayLoop, DisplayUpdate, KitchenDisplay, RecipeHandler, UpdateCallback,
};
pub use order::{
    available_actions, create_ticket, next_order_number, BoardCounts, OrderBoard, OrderError,
    OrderStatus, OrderStore, OrderTicket, Recipe, StatusAction, Transition, FIRST_ORDER_NUMBER,
};
pub use presentation::{
    format_clock, format_elapsed, format_order_number, status_display, status_display_raw,
    StatusCategory, StatusDisplay,
};
pub use stream::{
    decode_recipe, PayloadError, RecipeStream, SseDecoder, SseEvent, SseRecipeStream,
    StreamError, StreamHandler, Subscription,
};
