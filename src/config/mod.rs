pub mod config_load;
pub mod config_types;

pub use config_load::{Config, ConfigError, CONFIG_FILE};
pub use config_types::{AccessibilityConfig, OscConfig, ShakeConfig, StyleConfig, WindowConfig};
