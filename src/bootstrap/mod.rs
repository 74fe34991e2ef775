pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, load_config, load_config_or_default};
pub use run::{drive_until_interrupted, run, run_bootstrap, BootstrapOutcome};
pub use wiring::{build_coordinator, resolve_app_dirs};
