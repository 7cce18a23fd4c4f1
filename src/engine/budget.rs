use std::sync::atomic::{AtomicU64, Ordering};

/// Count of probes still allowed. `u64::MAX` stands for unbounded.
#[derive(Debug)]
pub struct RemainingBudget {
    remaining: AtomicU64,
}

impl RemainingBudget {
    #[must_use]
    pub const fn new(count: Option<u64>) -> Self {
        let initial = match count {
            Some(count) => count,
            None => u64::MAX,
        };
        Self {
            remaining: AtomicU64::new(initial),
        }
    }

    /// Atomically decrements the budget.
    ///
    /// Returns the post-decrement value, or `None` when the pre-decrement
    /// value was already zero. A `None` means the budget is exhausted and
    /// nothing may be dispatched.
    pub fn try_take(&self) -> Option<u64> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_sub(1)
            })
            .ok()
            .and_then(|previous| previous.checked_sub(1))
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }
}
