//! vaultgate host
//!
//! Wires the bootstrap coordinator to the file-backed setup status store and
//! to console navigation and error presentation.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
