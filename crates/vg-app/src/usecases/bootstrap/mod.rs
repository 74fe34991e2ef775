//! Bootstrap use cases.
//!
//! This module exposes the startup bootstrap coordinator.

mod context;
pub mod coordinator;
mod retry;

pub use coordinator::{BootstrapCoordinator, BootstrapPorts};
pub use retry::RetryHandle;
