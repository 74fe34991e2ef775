use async_trait::async_trait;

use crate::setup::SetupStatus;

#[async_trait]
pub trait SetupStatusPort: Send + Sync {
    async fn get_status(&self) -> anyhow::Result<SetupStatus>;
    async fn set_status(&self, status: &SetupStatus) -> anyhow::Result<()>;

    /// Whether authentication has been configured before.
    async fn is_configured(&self) -> anyhow::Result<bool> {
        Ok(self.get_status().await?.has_completed)
    }
}
