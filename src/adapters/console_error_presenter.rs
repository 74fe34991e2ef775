use std::io::Read;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream,
};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use vg_core::ports::{ErrorPresenterPort, RetryPort};

const FORWARD_BUFFER_SIZE: usize = 1024;

/// Prints the failure and waits for Enter before retrying.
///
/// End of input leaves the coordinator in `Failed`. The retry runs inline,
/// so the pending `start` resolves with the state of the last attempt.
pub struct ConsoleErrorPresenter<R, W> {
    input: Mutex<R>,
    out: Mutex<W>,
}

impl ConsoleErrorPresenter<BufReader<DuplexStream>, tokio::io::Stdout> {
    /// Reads confirmations from stdin on a detached thread.
    ///
    /// A prompt still waiting for Enter never holds up runtime shutdown,
    /// so Ctrl-C exits right away.
    pub fn stdio() -> std::io::Result<Self> {
        let input = forward_from_thread(std::io::stdin())?;
        Ok(Self::new(BufReader::new(input), tokio::io::stdout()))
    }
}

/// Pumps a blocking reader into an async stream from a plain OS thread.
///
/// The stream ends when `source` reaches end of input or fails, or once
/// the receiving half is dropped. Must be called from within a runtime.
fn forward_from_thread<S>(mut source: S) -> std::io::Result<DuplexStream>
where
    S: Read + Send + 'static,
{
    let handle = Handle::try_current().map_err(std::io::Error::other)?;
    let (reader, mut writer) = tokio::io::duplex(FORWARD_BUFFER_SIZE);

    std::thread::Builder::new()
        .name("vaultgate-stdin".to_string())
        .spawn(move || {
            let mut buf = [0u8; FORWARD_BUFFER_SIZE];
            loop {
                let read = match source.read(&mut buf) {
                    Ok(0) => break,
                    Ok(read) => read,
                    Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        debug!(error = %err, "stdin forwarding stopped");
                        break;
                    }
                };
                if handle.block_on(writer.write_all(&buf[..read])).is_err() {
                    break;
                }
            }
        })?;

    Ok(reader)
}

impl<R, W> ConsoleErrorPresenter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            input: Mutex::new(input),
            out: Mutex::new(out),
        }
    }

    pub fn into_output(self) -> W {
        self.out.into_inner()
    }
}

impl<R, W> ConsoleErrorPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn show(&self, message: &str) -> std::io::Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(format!("Startup failed: {message}\n").as_bytes())
            .await?;
        out.write_all(b"Press Enter to retry.\n").await?;
        out.flush().await
    }

    /// True once the user pressed Enter; false on end of input.
    async fn wait_for_enter(&self) -> std::io::Result<bool> {
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        Ok(read > 0)
    }
}

#[async_trait]
impl<R, W> ErrorPresenterPort for ConsoleErrorPresenter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn present_error(&self, message: &str, retry: Arc<dyn RetryPort>) {
        if let Err(err) = self.show(message).await {
            warn!(error = %err, "failed to print bootstrap error");
        }

        match self.wait_for_enter().await {
            Ok(true) => retry.retry().await,
            Ok(false) => debug!("input closed, not retrying"),
            Err(err) => warn!(error = %err, "failed to read retry confirmation"),
        }
    }
}
