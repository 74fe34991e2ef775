//! vaultgate application orchestration layer
//!
//! This crate contains the use cases that drive the core state machines
//! through their ports.

pub mod usecases;

pub use usecases::{BootstrapCoordinator, RetryHandle};
