//! Bootstrap state machine.
//!
//! Defines a pure state transition function for the startup routing decision.

/// Top-level flow entered once the setup check succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Authentication is configured, ask the user to log in.
    LoginFlow,
    /// First run, walk the user through initial setup.
    SetupFlow,
}

impl Destination {
    pub fn from_configured(configured: bool) -> Self {
        if configured {
            Destination::LoginFlow
        } else {
            Destination::SetupFlow
        }
    }
}

/// Bootstrap flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    /// Screen mounted, nothing started yet.
    Idle,
    /// Showing branding for the minimum display duration.
    Delaying,
    /// Waiting on the setup status provider.
    CheckingSetup,
    /// Routing decided. Terminal.
    Ready(Destination),
    /// Check failed; stays visible until the user retries.
    Failed { message: String },
}

impl BootstrapState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BootstrapState::Ready(_))
    }

    /// True while a sequence is between `start`/`retry` and its outcome.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, BootstrapState::Delaying | BootstrapState::CheckingSetup)
    }
}

/// Events that drive the bootstrap flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapEvent {
    /// Startup screen asks to begin.
    Start,
    /// User asked to try again.
    Retry,
    /// Minimum branding duration has passed.
    MinDurationElapsed,
    /// Provider answered.
    SetupChecked { configured: bool },
    /// Provider failed or timed out.
    SetupCheckFailed { message: String },
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapAction {
    /// Sleep for the minimum display duration.
    WaitMinDuration,
    /// Query the setup status provider once.
    CheckSetupStatus,
    /// Leave the bootstrap screen for the given flow.
    Navigate(Destination),
    /// Show the message with a retry affordance.
    PresentError { message: String },
}

/// Pure bootstrap state machine.
pub struct BootstrapStateMachine;

impl BootstrapStateMachine {
    pub fn transition(
        state: BootstrapState,
        event: BootstrapEvent,
    ) -> (BootstrapState, Vec<BootstrapAction>) {
        match (state, event) {
            (BootstrapState::Idle, BootstrapEvent::Start)
            | (BootstrapState::Idle, BootstrapEvent::Retry)
            | (BootstrapState::Failed { .. }, BootstrapEvent::Retry) => (
                BootstrapState::Delaying,
                vec![BootstrapAction::WaitMinDuration],
            ),
            (BootstrapState::Delaying, BootstrapEvent::MinDurationElapsed) => (
                BootstrapState::CheckingSetup,
                vec![BootstrapAction::CheckSetupStatus],
            ),
            (BootstrapState::CheckingSetup, BootstrapEvent::SetupChecked { configured }) => {
                let destination = Destination::from_configured(configured);
                (
                    BootstrapState::Ready(destination),
                    vec![BootstrapAction::Navigate(destination)],
                )
            }
            (BootstrapState::CheckingSetup, BootstrapEvent::SetupCheckFailed { message }) => (
                BootstrapState::Failed {
                    message: message.clone(),
                },
                vec![BootstrapAction::PresentError { message }],
            ),
            (state, _event) => (state, Vec::new()),
        }
    }
}
