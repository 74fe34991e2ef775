use std::sync::Weak;

use async_trait::async_trait;
use tracing::debug;
use vg_core::{ports::RetryPort, BootstrapState};

use super::coordinator::BootstrapCoordinator;

/// Retry callback handed to the error presenter.
///
/// Holds the coordinator weakly so a presenter keeping the handle around
/// does not keep a discarded coordinator alive.
#[derive(Clone)]
pub struct RetryHandle {
    coordinator: Weak<BootstrapCoordinator>,
}

impl RetryHandle {
    pub(super) fn new(coordinator: Weak<BootstrapCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Retries and returns the resulting state, or `None` if the
    /// coordinator has been dropped.
    pub async fn retry_now(&self) -> Option<BootstrapState> {
        let Some(coordinator) = self.coordinator.upgrade() else {
            debug!("retry requested after coordinator was dropped");
            return None;
        };
        Some(coordinator.retry().await)
    }
}

#[async_trait]
impl RetryPort for RetryHandle {
    async fn retry(&self) {
        self.retry_now().await;
    }
}
