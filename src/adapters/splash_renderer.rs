use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use vg_core::BootstrapState;

fn splash_line(state: &BootstrapState) -> Option<&'static str> {
    match state {
        BootstrapState::Delaying => Some("vaultgate\n"),
        BootstrapState::CheckingSetup => Some("Checking setup...\n"),
        _ => None,
    }
}

/// Follows the coordinator's state and draws the branding screen.
///
/// Returns once a terminal state is seen or the coordinator is dropped.
pub async fn render_splash<W>(
    mut states: watch::Receiver<BootstrapState>,
    mut out: W,
) -> std::io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let state = states.borrow_and_update().clone();
        if let Some(line) = splash_line(&state) {
            out.write_all(line.as_bytes()).await?;
            out.flush().await?;
        }
        if state.is_terminal() || states.changed().await.is_err() {
            return Ok(out);
        }
    }
}
