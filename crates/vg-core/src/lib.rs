//! # vg-core
//!
//! Core domain models and business logic for vaultgate.
//!
//! This crate contains the startup bootstrap state machine and the port
//! contracts it is driven through, without any infrastructure dependencies.

pub mod bootstrap;
pub mod config;
pub mod ports;
pub mod setup;

pub use bootstrap::{
    BootstrapAction, BootstrapError, BootstrapEvent, BootstrapState, BootstrapStateMachine,
    Destination,
};
pub use config::BootstrapConfig;
pub use setup::SetupStatus;
