use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncWrite;
use tracing::{info, warn};
use vg_app::BootstrapCoordinator;
use vg_core::ports::SetupStatusPort;
use vg_core::{BootstrapConfig, BootstrapState, Destination};
use vg_infra::FileSetupStatusStore;

use super::config::{apply_env_overrides, load_config_or_default};
use super::tracing::init_tracing_subscriber;
use super::wiring::{build_coordinator, resolve_app_dirs};
use crate::adapters::render_splash;
use crate::cli::{Cli, Command};

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let app_dirs = resolve_app_dirs(cli.data_dir.clone())?;
    init_tracing_subscriber(Some(&app_dirs.logs_dir()))?;

    let store = Arc::new(FileSetupStatusStore::with_defaults(&app_dirs.app_data_root));

    match cli.command() {
        Command::Run => {
            let config_path = cli.config.unwrap_or_else(|| app_dirs.config_file());
            let config = apply_env_overrides(load_config_or_default(&config_path)?)?;
            info!(
                data_dir = %app_dirs.app_data_root.display(),
                config = %config_path.display(),
                "starting bootstrap"
            );
            run_bootstrap(config, store).await
        }
        Command::MarkConfigured => {
            store.mark_configured().await?;
            println!("Setup marked as configured ({})", store.path().display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Reset => {
            store.reset().await?;
            println!("Setup status cleared");
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            let status = store.get_status().await?;
            match status.completed_at {
                Some(at) if status.has_completed => println!("configured (since {at})"),
                _ if status.has_completed => println!("configured"),
                _ => println!("not configured"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Routing decided and the flow was entered.
    Ready(Destination),
    /// The sequence stopped short of a destination, e.g. input closed on `Failed`.
    Unsettled(BootstrapState),
    /// The user interrupted; the coordinator was torn down.
    Interrupted,
}

impl BootstrapOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BootstrapOutcome::Ready(_) => ExitCode::SUCCESS,
            BootstrapOutcome::Unsettled(_) => ExitCode::FAILURE,
            BootstrapOutcome::Interrupted => ExitCode::from(EXIT_INTERRUPTED),
        }
    }
}

/// Runs the coordinator until it settles or the user presses Ctrl-C.
pub async fn run_bootstrap(
    config: BootstrapConfig,
    setup_status: Arc<dyn SetupStatusPort>,
) -> anyhow::Result<ExitCode> {
    let coordinator = build_coordinator(config, setup_status)?;
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl-C")
    };

    let outcome = drive_until_interrupted(&coordinator, tokio::io::stdout(), interrupt).await?;
    Ok(outcome.exit_code())
}

/// Starts `coordinator`, drawing the splash to `splash_out`, and races it
/// against `interrupt`. An interrupt tears the coordinator down, including
/// while an error prompt is still waiting for the user.
pub async fn drive_until_interrupted<W, F>(
    coordinator: &BootstrapCoordinator,
    splash_out: W,
    interrupt: F,
) -> anyhow::Result<BootstrapOutcome>
where
    W: AsyncWrite + Unpin + Send + 'static,
    F: Future<Output = anyhow::Result<()>>,
{
    let config = coordinator.config();
    info!(
        min_display_ms = config.min_display_duration.as_millis() as u64,
        setup_check_timeout = ?config.setup_check_timeout,
        "bootstrap configured"
    );

    let splash = tokio::spawn(render_splash(coordinator.subscribe(), splash_out));

    let settled = tokio::select! {
        state = coordinator.start() => Ok(Some(state)),
        signal = interrupt => {
            coordinator.teardown();
            signal.map(|()| None)
        }
    };
    splash.abort();

    let outcome = match settled? {
        Some(BootstrapState::Ready(destination)) => {
            info!(?destination, "bootstrap finished");
            BootstrapOutcome::Ready(destination)
        }
        Some(state) => {
            warn!(?state, "bootstrap ended without a destination");
            BootstrapOutcome::Unsettled(state)
        }
        None => {
            info!(state = ?coordinator.current_state(), "bootstrap interrupted");
            BootstrapOutcome::Interrupted
        }
    };

    Ok(outcome)
}
