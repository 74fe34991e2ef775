//! Setup status domain module.

mod status;

pub use status::SetupStatus;
