use std::sync::Arc;

use async_trait::async_trait;

/// Re-runs the bootstrap sequence on behalf of the user.
#[async_trait]
pub trait RetryPort: Send + Sync {
    async fn retry(&self);
}

/// Shows a bootstrap failure with its single retry action.
///
/// How the message is rendered is up to the implementation. The retry
/// handle may be kept and invoked later, or awaited from inside
/// `present_error`.
///
/// Awaiting it inline runs the next attempt nested in this call, so the
/// `start`/`retry` that presented the error resolves only once the last
/// attempt settles and returns that attempt's state. Each further inline
/// retry adds one level of nesting.
#[async_trait]
pub trait ErrorPresenterPort: Send + Sync {
    async fn present_error(&self, message: &str, retry: Arc<dyn RetryPort>);
}
