use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::info;
use vg_core::{ports::NavigationPort, Destination};

/// Navigation sink that announces the chosen flow on a console.
pub struct ConsoleNavigation<W> {
    out: Mutex<W>,
}

impl ConsoleNavigation<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ConsoleNavigation<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

pub(crate) fn flow_label(destination: Destination) -> &'static str {
    match destination {
        Destination::LoginFlow => "login",
        Destination::SetupFlow => "setup",
    }
}

#[async_trait]
impl<W> NavigationPort for ConsoleNavigation<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn navigate(&self, destination: Destination) -> anyhow::Result<()> {
        info!(?destination, "navigating out of bootstrap");
        let mut out = self.out.lock().await;
        out.write_all(format!("Entering {} flow\n", flow_label(destination)).as_bytes())
            .await
            .context("failed to write navigation notice")?;
        out.flush().await?;
        Ok(())
    }
}
