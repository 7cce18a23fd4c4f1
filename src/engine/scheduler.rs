use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, warn};

use crate::probe::{ProbeExecutor, ProbeOutcome, ProbeTicket};
use crate::shutdown::{ShutdownSender, request_shutdown};

use super::budget::RemainingBudget;
use super::lifecycle::{DrainTrigger, Lifecycle, Phase};

/// Periodic dispatcher. Each tick spends one unit of budget and spawns one
/// probe; the first tick fires one interval after start.
pub(crate) struct Scheduler<'run> {
    pub(crate) executor: Arc<ProbeExecutor>,
    pub(crate) budget: &'run RemainingBudget,
    pub(crate) interval: Duration,
    pub(crate) lifecycle: &'run Lifecycle,
    pub(crate) shutdown_tx: &'run ShutdownSender,
}

impl Scheduler<'_> {
    /// Ticks until shutdown, then waits for every dispatched probe.
    /// Returns how many probes were dispatched.
    pub(crate) async fn run(self) -> u64 {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut tasks: JoinSet<ProbeOutcome> = JoinSet::new();
        let mut dispatched: u64 = 0;

        if self.lifecycle.phase() == Phase::Running {
            let start = Instant::now()
                .checked_add(self.interval)
                .unwrap_or_else(Instant::now);
            let mut ticker = interval_at(start, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        if self.lifecycle.phase() != Phase::Running {
                            debug!("Drain already started; no further dispatch.");
                            break;
                        }
                        let Some(remaining) = self.budget.try_take() else {
                            request_shutdown(
                                self.lifecycle,
                                self.shutdown_tx,
                                DrainTrigger::BudgetExhausted,
                            );
                            break;
                        };
                        dispatched = dispatched.saturating_add(1);
                        let executor = Arc::clone(&self.executor);
                        let ticket = ProbeTicket {
                            sequence: dispatched,
                            remaining,
                        };
                        tasks.spawn(async move { executor.execute(ticket).await });
                    }
                    Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                        reap(joined);
                    }
                }
            }
        } else {
            debug!("Shutdown requested before the first tick.");
        }

        drain(&mut tasks).await;
        dispatched
    }
}

/// Waits for every outstanding probe. Nothing is aborted.
pub(crate) async fn drain(tasks: &mut JoinSet<ProbeOutcome>) {
    if !tasks.is_empty() {
        debug!("Waiting for {} in-flight probes.", tasks.len());
    }
    while let Some(joined) = tasks.join_next().await {
        reap(joined);
    }
}

fn reap(joined: Result<ProbeOutcome, JoinError>) {
    if let Err(err) = joined {
        warn!("Probe task failed: {}", err);
    }
}
