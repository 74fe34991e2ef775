use crate::bootstrap::Destination;

/// Leaves the bootstrap screen for a top-level flow.
///
/// Called at most once per coordinator; there is no way back.
#[async_trait::async_trait]
pub trait NavigationPort: Send + Sync {
    async fn navigate(&self, destination: Destination) -> anyhow::Result<()>;
}
