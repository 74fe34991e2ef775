//! Business logic use cases

pub mod bootstrap;

pub use bootstrap::{BootstrapCoordinator, BootstrapPorts, RetryHandle};
