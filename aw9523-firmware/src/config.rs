//! Expander configuration
//!
//! `expander_config()` is generated from expander.toml by the build script.

use aw9523_core::{Aw9523Config, ConfigError, DriveMode, LedCurrent, Pin, PinConfig};

include!(concat!(env!("OUT_DIR"), "/expander_config.rs"));
