//! Dependency wiring for the bootstrap host.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use vg_app::usecases::{BootstrapCoordinator, BootstrapPorts};
use vg_core::ports::{ErrorPresenterPort, NavigationPort, SetupStatusPort};
use vg_core::BootstrapConfig;
use vg_infra::{AppDirs, DirsAppDirsAdapter};

use crate::adapters::{ConsoleErrorPresenter, ConsoleNavigation};

/// `--data-dir` when given, otherwise the platform data directory.
pub fn resolve_app_dirs(data_dir_override: Option<PathBuf>) -> anyhow::Result<AppDirs> {
    match data_dir_override {
        Some(app_data_root) => Ok(AppDirs { app_data_root }),
        None => Ok(DirsAppDirsAdapter::new().get_app_dirs()?),
    }
}

/// Coordinator talking to the console on stdin/stdout.
pub fn build_coordinator(
    config: BootstrapConfig,
    setup_status: Arc<dyn SetupStatusPort>,
) -> anyhow::Result<Arc<BootstrapCoordinator>> {
    let error_presenter =
        ConsoleErrorPresenter::stdio().context("failed to attach retry prompt to stdin")?;

    Ok(build_coordinator_with(
        config,
        setup_status,
        Arc::new(ConsoleNavigation::stdout()),
        Arc::new(error_presenter),
    ))
}

pub fn build_coordinator_with(
    config: BootstrapConfig,
    setup_status: Arc<dyn SetupStatusPort>,
    navigation: Arc<dyn NavigationPort>,
    error_presenter: Arc<dyn ErrorPresenterPort>,
) -> Arc<BootstrapCoordinator> {
    BootstrapCoordinator::new(
        config,
        BootstrapPorts {
            setup_status,
            navigation,
            error_presenter,
        },
    )
}
