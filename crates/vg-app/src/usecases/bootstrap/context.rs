use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use vg_core::BootstrapState;

/// Shared bootstrap context: current state plus the two lifecycle flags.
///
/// `state` is only written by the coordinator while it holds the in-flight
/// guard. Readers go through `get_state` or a `watch` subscription.
pub(super) struct BootstrapContext {
    state: watch::Sender<BootstrapState>,
    /// Set while a start/retry sequence runs. At most one sequence at a time.
    in_flight: AtomicBool,
    /// Cleared on teardown; nothing is applied to the host afterwards.
    mounted: AtomicBool,
}

impl BootstrapContext {
    pub(super) fn new() -> Self {
        let (state, _) = watch::channel(BootstrapState::Idle);
        Self {
            state,
            in_flight: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    pub(super) fn get_state(&self) -> BootstrapState {
        self.state.borrow().clone()
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<BootstrapState> {
        self.state.subscribe()
    }

    /// Publishes `state` unless the host is gone. Returns whether it was applied.
    pub(super) fn set_state(&self, state: BootstrapState) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.state.send_replace(state);
        true
    }

    pub(super) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Returns true the first time it is called.
    pub(super) fn unmount(&self) -> bool {
        self.mounted.swap(false, Ordering::SeqCst)
    }

    /// Claims the in-flight slot, or `None` if a sequence is already running.
    pub(super) fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard {
                flag: &self.in_flight,
            })
    }
}

/// Releases the in-flight slot on drop, including when the driving future
/// is cancelled mid-sequence.
pub(super) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
