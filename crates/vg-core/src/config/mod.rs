//! Bootstrap configuration domain model

mod bootstrap_config;

pub use bootstrap_config::{timeout_from_millis, BootstrapConfig, DEFAULT_MIN_DISPLAY_DURATION};
