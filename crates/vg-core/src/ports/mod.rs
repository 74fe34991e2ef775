//! Port interfaces for the application layer
//!
//! Ports define the contract between the bootstrap coordinator and the
//! collaborators it does not own: the setup status source, navigation
//! and error presentation.

mod error_presenter;
mod navigation;
pub mod setup_status;

pub use error_presenter::{ErrorPresenterPort, RetryPort};
pub use navigation::NavigationPort;
pub use setup_status::SetupStatusPort;
