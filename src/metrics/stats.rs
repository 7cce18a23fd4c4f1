use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::probe::ProbeOutcome;

/// Initial minimum; replaced by the first success.
const MIN_LATENCY_SENTINEL: u64 = u64::MAX;
/// 100 (percent) times 1e6 (six decimals).
const PERCENT_MICROS_SCALE: u128 = 100_000_000;

/// Lock-free statistics shared by every probe task.
///
/// Writers bump `total_issued` before `total_errors`, and snapshots read
/// them in the opposite order, so `errors <= issued` holds for any
/// observer.
#[derive(Debug)]
pub struct ProbeStats {
    total_issued: AtomicU64,
    total_errors: AtomicU64,
    latency_sum_nanos: AtomicU64,
    min_latency_nanos: AtomicU64,
    max_latency_nanos: AtomicU64,
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_issued: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
            latency_sum_nanos: AtomicU64::new(0),
            min_latency_nanos: AtomicU64::new(MIN_LATENCY_SENTINEL),
            max_latency_nanos: AtomicU64::new(0),
        }
    }

    /// Folds one outcome into the totals. Call exactly once per probe.
    pub fn record(&self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Success { latency } => {
                let nanos = u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX);
                self.latency_sum_nanos.fetch_add(nanos, Ordering::SeqCst);
                self.min_latency_nanos.fetch_min(nanos, Ordering::SeqCst);
                self.max_latency_nanos.fetch_max(nanos, Ordering::SeqCst);
                self.total_issued.fetch_add(1, Ordering::SeqCst);
            }
            ProbeOutcome::Failure { .. } => {
                self.total_issued.fetch_add(1, Ordering::SeqCst);
                self.total_errors.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let total_errors = self.total_errors.load(Ordering::SeqCst);
        let total_issued = self.total_issued.load(Ordering::SeqCst);
        let latency_sum = Duration::from_nanos(self.latency_sum_nanos.load(Ordering::SeqCst));
        let min_nanos = self.min_latency_nanos.load(Ordering::SeqCst);
        let max_nanos = self.max_latency_nanos.load(Ordering::SeqCst);
        let has_success = min_nanos != MIN_LATENCY_SENTINEL;

        StatsSnapshot {
            total_issued,
            total_errors,
            latency_sum,
            min_latency: has_success.then(|| Duration::from_nanos(min_nanos)),
            max_latency: has_success.then(|| Duration::from_nanos(max_nanos)),
        }
    }
}

/// Point-in-time copy of `ProbeStats`. Only meaningful as a final report
/// once every probe has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_issued: u64,
    pub total_errors: u64,
    pub latency_sum: Duration,
    pub min_latency: Option<Duration>,
    pub max_latency: Option<Duration>,
}

impl StatsSnapshot {
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.total_issued.saturating_sub(self.total_errors)
    }

    /// Mean latency over successful probes, `None` without successes.
    #[must_use]
    pub fn average_latency(&self) -> Option<Duration> {
        let successes = self.successes();
        if successes == 0 {
            return None;
        }
        let average = self
            .latency_sum
            .as_nanos()
            .checked_div(u128::from(successes))?;
        Some(Duration::from_nanos(
            u64::try_from(average).unwrap_or(u64::MAX),
        ))
    }

    /// Error percentage scaled by 1e6 (six decimal places), rounded half up.
    /// Zero when nothing was issued.
    #[must_use]
    pub fn error_percent_micros(&self) -> u64 {
        if self.total_issued == 0 {
            return 0;
        }
        let total = u128::from(self.total_issued);
        let scaled = u128::from(self.total_errors)
            .saturating_mul(PERCENT_MICROS_SCALE)
            .saturating_mul(2)
            .saturating_add(total)
            .checked_div(total.saturating_mul(2))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Error percentage rendered with six decimals, e.g. `12.500000`.
    #[must_use]
    pub fn error_percent_text(&self) -> String {
        let scaled = self.error_percent_micros();
        format!(
            "{}.{:06}",
            scaled.checked_div(1_000_000).unwrap_or(0),
            scaled.checked_rem(1_000_000).unwrap_or(0)
        )
    }
}
