//! Bootstrap domain module.
//!
//! This module defines the startup routing state machine types.

pub mod error;
pub mod state_machine;

pub use error::BootstrapError;
pub use state_machine::{
    BootstrapAction, BootstrapEvent, BootstrapState, BootstrapStateMachine, Destination,
};
