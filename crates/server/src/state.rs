use kitchen_core::{Config, DisplayHandle};

use crate::api::WsBroadcaster;

/// Shared application state
pub struct AppState {
    config: Config,
    display: DisplayHandle,
    ws_broadcaster: WsBroadcaster,
}

impl AppState {
    pub fn new(config: Config, display: DisplayHandle, ws_broadcaster: WsBroadcaster) -> Self {
        Self {
            config,
            display,
            ws_broadcaster,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &DisplayHandle {
        &self.display
    }

    pub fn ws_broadcaster(&self) -> &WsBroadcaster {
        &self.ws_broadcaster
    }
}
