use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::debug;

const RUNNING: u8 = 0;
const DRAINING: u8 = 1;
const REPORTED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Draining,
    Reported,
}

/// What moved the run out of `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainTrigger {
    Signal,
    BudgetExhausted,
}

impl fmt::Display for DrainTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainTrigger::Signal => f.write_str("signal"),
            DrainTrigger::BudgetExhausted => f.write_str("budget exhausted"),
        }
    }
}

/// Run state machine: `Running -> Draining -> Reported`. Transitions only
/// move forward and each one happens at most once.
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
    trigger: OnceLock<DrainTrigger>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
            trigger: OnceLock::new(),
        }
    }

    /// Moves `Running -> Draining`. Returns `false` if a drain was already
    /// started, in which case `trigger` is ignored.
    pub fn begin_drain(&self, trigger: DrainTrigger) -> bool {
        let started = self
            .state
            .compare_exchange(RUNNING, DRAINING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if started && self.trigger.set(trigger).is_err() {
            debug!("Drain trigger was already recorded.");
        }
        started
    }

    /// Moves `Draining -> Reported`. Returns `false` on any other state.
    pub fn mark_reported(&self) -> bool {
        self.state
            .compare_exchange(DRAINING, REPORTED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state.load(Ordering::SeqCst) {
            RUNNING => Phase::Running,
            DRAINING => Phase::Draining,
            _ => Phase::Reported,
        }
    }

    #[must_use]
    pub fn trigger(&self) -> Option<DrainTrigger> {
        self.trigger.get().copied()
    }
}
