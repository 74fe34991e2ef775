//! Bootstrap coordinator.
//!
//! This module drives the bootstrap state machine and its side effects:
//! the minimum branding wait, the setup status query, navigation and error
//! presentation.

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use vg_core::{
    ports::{ErrorPresenterPort, NavigationPort, RetryPort, SetupStatusPort},
    BootstrapAction, BootstrapConfig, BootstrapError, BootstrapEvent, BootstrapState,
    BootstrapStateMachine, Destination,
};

use super::context::BootstrapContext;
use super::retry::RetryHandle;

/// Collaborators the coordinator talks to.
pub struct BootstrapPorts {
    pub setup_status: Arc<dyn SetupStatusPort>,
    pub navigation: Arc<dyn NavigationPort>,
    pub error_presenter: Arc<dyn ErrorPresenterPort>,
}

/// Host-facing effect collected during a sequence and applied once the
/// in-flight slot is released.
#[derive(Debug)]
enum HostEffect {
    Navigate(Destination),
    PresentError(String),
}

/// Decides, once per launch, whether to enter the login or the setup flow.
pub struct BootstrapCoordinator {
    context: BootstrapContext,
    config: BootstrapConfig,
    setup_status: Arc<dyn SetupStatusPort>,
    navigation: Arc<dyn NavigationPort>,
    error_presenter: Arc<dyn ErrorPresenterPort>,
    self_ref: Weak<BootstrapCoordinator>,
}

impl BootstrapCoordinator {
    pub fn new(config: BootstrapConfig, ports: BootstrapPorts) -> Arc<Self> {
        let BootstrapPorts {
            setup_status,
            navigation,
            error_presenter,
        } = ports;

        Arc::new_cyclic(|self_ref| Self {
            context: BootstrapContext::new(),
            config,
            setup_status,
            navigation,
            error_presenter,
            self_ref: self_ref.clone(),
        })
    }

    /// Runs the sequence from `Idle` and returns the state it settled in.
    ///
    /// No-op while another sequence is in flight, after a decision was made,
    /// or after teardown; the current state is returned unchanged.
    pub async fn start(&self) -> BootstrapState {
        self.run(BootstrapEvent::Start).await
    }

    /// Runs the whole sequence again, minimum wait included.
    ///
    /// Accepted from `Failed` (and from `Idle`, where it acts as `start`).
    /// Coalesced with any sequence already in flight.
    pub async fn retry(&self) -> BootstrapState {
        self.run(BootstrapEvent::Retry).await
    }

    pub fn current_state(&self) -> BootstrapState {
        self.context.get_state()
    }

    /// Receiver that observes every published state, for passive rendering.
    pub fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.context.subscribe()
    }

    /// The hosting screen is gone: pending transitions and their
    /// navigation or error display are dropped from now on.
    pub fn teardown(&self) {
        if self.context.unmount() {
            info!(state = ?self.context.get_state(), "bootstrap host torn down");
        }
    }

    pub fn is_active(&self) -> bool {
        self.context.is_mounted()
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    async fn run(&self, event: BootstrapEvent) -> BootstrapState {
        if !self.context.is_mounted() {
            debug!(event = ?event, "bootstrap ignored after teardown");
            return self.context.get_state();
        }

        let Some(guard) = self.context.try_begin() else {
            debug!(event = ?event, "bootstrap already in flight, ignoring");
            return self.context.get_state();
        };

        let current = self.context.get_state();
        if current.is_in_flight() {
            // A previous driver was dropped mid-sequence and left its state behind.
            warn!(state = ?current, "resetting interrupted bootstrap sequence");
            self.context.set_state(BootstrapState::Idle);
        }

        let span = info_span!("usecase.bootstrap_coordinator.dispatch", event = ?event);
        let effects = self.dispatch(event).instrument(span).await;
        drop(guard);

        self.apply_effects(effects).await;
        self.context.get_state()
    }

    async fn dispatch(&self, event: BootstrapEvent) -> Vec<HostEffect> {
        let mut current = self.context.get_state();
        let mut pending_events = vec![event];
        let mut effects = Vec::new();

        while let Some(event) = pending_events.pop() {
            let from = current.clone();
            let event_name = format!("{:?}", event);
            let (next, actions) = BootstrapStateMachine::transition(current, event);
            if next == from && actions.is_empty() {
                debug!(state = ?from, event = %event_name, "bootstrap event ignored");
                current = next;
                continue;
            }

            if !self.context.set_state(next.clone()) {
                info!(
                    from = ?from,
                    to = ?next,
                    event = %event_name,
                    "bootstrap transition discarded after teardown"
                );
                return Vec::new();
            }
            info!(from = ?from, to = ?next, event = %event_name, "bootstrap state transition");
            current = next;

            for action in actions {
                debug!(?action, "bootstrap executing action");
                match action {
                    BootstrapAction::WaitMinDuration => {
                        tokio::time::sleep(self.config.min_display_duration).await;
                        pending_events.push(BootstrapEvent::MinDurationElapsed);
                    }
                    BootstrapAction::CheckSetupStatus => {
                        pending_events.push(self.check_setup_status().await);
                    }
                    BootstrapAction::Navigate(destination) => {
                        effects.push(HostEffect::Navigate(destination));
                    }
                    BootstrapAction::PresentError { message } => {
                        effects.push(HostEffect::PresentError(message));
                    }
                }
            }
        }

        effects
    }

    /// Queries the provider exactly once, bounded by the optional timeout.
    async fn check_setup_status(&self) -> BootstrapEvent {
        let query = self.setup_status.is_configured();
        let outcome = match self.config.setup_check_timeout {
            Some(limit) => match tokio::time::timeout(limit, query).await {
                Ok(result) => result.map_err(|err| BootstrapError::initialization(&err)),
                Err(_) => Err(BootstrapError::Timeout(limit)),
            },
            None => query
                .await
                .map_err(|err| BootstrapError::initialization(&err)),
        };

        match outcome {
            Ok(configured) => {
                debug!(configured, "setup status check completed");
                BootstrapEvent::SetupChecked { configured }
            }
            Err(err) => {
                error!(error = %err, "setup status check failed");
                BootstrapEvent::SetupCheckFailed {
                    message: err.to_string(),
                }
            }
        }
    }

    async fn apply_effects(&self, effects: Vec<HostEffect>) {
        for effect in effects {
            if !self.context.is_mounted() {
                info!(?effect, "bootstrap effect dropped after teardown");
                continue;
            }

            match effect {
                HostEffect::Navigate(destination) => {
                    if let Err(err) = self.navigation.navigate(destination).await {
                        error!(error = %err, ?destination, "bootstrap navigation failed");
                    }
                }
                HostEffect::PresentError(message) => {
                    let retry: Arc<dyn RetryPort> =
                        Arc::new(RetryHandle::new(self.self_ref.clone()));
                    self.error_presenter.present_error(&message, retry).await;
                }
            }
        }
    }
}
