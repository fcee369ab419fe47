use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for overrides.
const ENV_PREFIX: &str = "KITCHEN_";

/// Providers for a config file plus environment overrides.
///
/// Overrides use `KITCHEN_<SECTION>__<KEY>`, e.g. `KITCHEN_STREAM__URL` or
/// `KITCHEN_DISPLAY__DESELECT_DELAY_MS`. `KITCHEN_CONFIG` names the file and
/// is not treated as a key.
fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Load configuration from `path`, applying environment overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    figment(path)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from a TOML string, without environment overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
