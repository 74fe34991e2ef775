use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::BufReader;
use tokio::sync::oneshot;
use vaultgate_lib::adapters::{ConsoleErrorPresenter, ConsoleNavigation};
use vaultgate_lib::bootstrap::wiring::build_coordinator_with;
use vaultgate_lib::bootstrap::{
    drive_until_interrupted, load_config_or_default, resolve_app_dirs, BootstrapOutcome,
};
use vg_core::ports::SetupStatusPort;
use vg_core::{BootstrapConfig, BootstrapState, Destination};
use vg_infra::FileSetupStatusStore;

fn quick_config() -> BootstrapConfig {
    BootstrapConfig::default().with_min_display_duration(Duration::from_millis(10))
}

fn coordinator_over(
    store: Arc<FileSetupStatusStore>,
) -> Arc<vg_app::BootstrapCoordinator> {
    build_coordinator_with(
        quick_config(),
        store,
        Arc::new(ConsoleNavigation::new(tokio::io::sink())),
        Arc::new(ConsoleErrorPresenter::new(&b""[..], tokio::io::sink())),
    )
}

#[tokio::test]
async fn fresh_data_dir_routes_to_setup_flow() {
    let temp_dir = TempDir::new().unwrap();
    let app_dirs = resolve_app_dirs(Some(temp_dir.path().to_path_buf())).unwrap();
    let store = Arc::new(FileSetupStatusStore::with_defaults(&app_dirs.app_data_root));

    let state = coordinator_over(store).start().await;

    assert_eq!(state, BootstrapState::Ready(Destination::SetupFlow));
}

#[tokio::test]
async fn configured_data_dir_routes_to_login_flow() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileSetupStatusStore::with_defaults(temp_dir.path()));
    store.mark_configured().await.unwrap();

    let state = coordinator_over(store).start().await;

    assert_eq!(state, BootstrapState::Ready(Destination::LoginFlow));
}

#[tokio::test]
async fn corrupt_status_file_fails_with_parse_message() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileSetupStatusStore::with_defaults(temp_dir.path()));
    tokio::fs::write(store.path(), "{not json").await.unwrap();

    let coordinator = coordinator_over(store.clone());
    let state = coordinator.start().await;

    match state {
        BootstrapState::Failed { message } => {
            assert!(message.starts_with("failed to parse setup status"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    // Fixing the file and retrying routes normally.
    store.reset().await.unwrap();
    assert!(!store.is_configured().await.unwrap());
    assert_eq!(
        coordinator.retry().await,
        BootstrapState::Ready(Destination::SetupFlow)
    );
}

#[test]
fn config_file_in_data_dir_is_optional() {
    let temp_dir = TempDir::new().unwrap();
    let app_dirs = resolve_app_dirs(Some(temp_dir.path().to_path_buf())).unwrap();

    let config = load_config_or_default(&app_dirs.config_file()).unwrap();

    assert_eq!(config, BootstrapConfig::default());
}

async fn corrupt_store(temp_dir: &TempDir) -> Arc<FileSetupStatusStore> {
    let store = Arc::new(FileSetupStatusStore::with_defaults(temp_dir.path()));
    tokio::fs::write(store.path(), "{bad").await.unwrap();
    store
}

#[tokio::test]
async fn drive_returns_ready_when_not_interrupted() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileSetupStatusStore::with_defaults(temp_dir.path()));
    let coordinator = coordinator_over(store);
    assert_eq!(coordinator.config(), &quick_config());

    let outcome = drive_until_interrupted(
        &coordinator,
        tokio::io::sink(),
        std::future::pending::<anyhow::Result<()>>(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, BootstrapOutcome::Ready(Destination::SetupFlow));
    assert!(coordinator.is_active());
}

#[tokio::test]
async fn drive_reports_unsettled_when_prompt_input_closes() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = coordinator_over(corrupt_store(&temp_dir).await);

    let outcome = drive_until_interrupted(
        &coordinator,
        tokio::io::sink(),
        std::future::pending::<anyhow::Result<()>>(),
    )
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        BootstrapOutcome::Unsettled(BootstrapState::Failed { .. })
    ));
}

#[tokio::test]
async fn interrupt_while_retry_prompt_waits_tears_down_and_returns() {
    let temp_dir = TempDir::new().unwrap();
    let store = corrupt_store(&temp_dir).await;
    // Keyboard side stays open and silent, so the prompt never gets Enter.
    let (_keyboard, input) = tokio::io::duplex(64);
    let coordinator = build_coordinator_with(
        quick_config(),
        store.clone(),
        Arc::new(ConsoleNavigation::new(tokio::io::sink())),
        Arc::new(ConsoleErrorPresenter::new(
            BufReader::new(input),
            tokio::io::sink(),
        )),
    );

    let (interrupt_tx, interrupt_rx) = oneshot::channel::<()>();
    let mut states = coordinator.subscribe();
    tokio::spawn(async move {
        let _ = states
            .wait_for(|state| matches!(state, BootstrapState::Failed { .. }))
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let _ = interrupt_tx.send(());
    });
    let interrupt = async { interrupt_rx.await.map_err(anyhow::Error::from) };

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        drive_until_interrupted(&coordinator, tokio::io::sink(), interrupt),
    )
    .await
    .expect("interrupt should end the run while the prompt waits")
    .unwrap();

    assert_eq!(outcome, BootstrapOutcome::Interrupted);
    assert!(!coordinator.is_active());
    assert!(matches!(
        coordinator.current_state(),
        BootstrapState::Failed { .. }
    ));

    // Nothing restarts after teardown.
    store.reset().await.unwrap();
    assert!(matches!(
        coordinator.retry().await,
        BootstrapState::Failed { .. }
    ));
}
