//! Configuration file loading for socratic-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SOCRATIC_*` (nested keys separated by `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./socratic.toml` or `./.socratic.toml`
//! 4. Global: `$XDG_CONFIG_HOME/socratic-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBehaviorConfig, FileConfig, FileEndpointConfig, FileModelConfig,
    FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
