//! Periodic dispatch engine: budget accounting, the run lifecycle, and the
//! drain barrier in front of the final report.
mod budget;
mod lifecycle;
mod scheduler;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::args::Network;
use crate::config::RunSettings;
use crate::error::AppResult;
use crate::metrics::{ProbeStats, StatsSnapshot};
use crate::probe::{ProbeExecutor, ProbeParams, Resolver, TargetList};
use crate::shutdown::ShutdownSender;

pub use budget::RemainingBudget;
pub use lifecycle::{DrainTrigger, Lifecycle, Phase};

use scheduler::Scheduler;

/// Final state of a drained run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub server: SocketAddr,
    pub network: Network,
    pub stats: StatsSnapshot,
    pub dispatched: u64,
    pub trigger: Option<DrainTrigger>,
}

pub struct ProbeEngine {
    executor: Arc<ProbeExecutor>,
    stats: Arc<ProbeStats>,
    budget: RemainingBudget,
    interval: Duration,
    lifecycle: Arc<Lifecycle>,
}

impl ProbeEngine {
    /// Wires targets, statistics and the resolver for one run.
    ///
    /// # Errors
    ///
    /// Returns an error when the host list is empty.
    pub fn new(
        settings: &RunSettings,
        resolver: Arc<dyn Resolver>,
        lifecycle: Arc<Lifecycle>,
    ) -> AppResult<Self> {
        let targets = TargetList::new(settings.hosts.clone(), settings.seed)?;
        let stats = Arc::new(ProbeStats::new());
        let executor = ProbeExecutor::new(
            targets,
            resolver,
            Arc::clone(&stats),
            ProbeParams {
                server: settings.server,
                network: settings.network,
                record_type: settings.record_type,
                timeout: settings.timeout,
            },
        );
        Ok(Self {
            executor: Arc::new(executor),
            stats,
            budget: RemainingBudget::new(settings.budget),
            interval: settings.interval,
            lifecycle,
        })
    }

    /// Dispatches probes until a signal or budget exhaustion, drains every
    /// in-flight probe, and only then snapshots the statistics.
    pub async fn run(self, shutdown_tx: &ShutdownSender) -> RunReport {
        info!(
            "Probing {} over {} every {}ms.",
            self.executor.server(),
            self.executor.network().label(),
            self.interval.as_millis()
        );

        let dispatched = Scheduler {
            executor: Arc::clone(&self.executor),
            budget: &self.budget,
            interval: self.interval,
            lifecycle: &self.lifecycle,
            shutdown_tx,
        }
        .run()
        .await;

        let stats = self.stats.snapshot();
        if !self.lifecycle.mark_reported() {
            debug!("Lifecycle was not draining when the report was built.");
        }
        debug!(
            "Drained {} probes ({} issued, {} errors).",
            dispatched, stats.total_issued, stats.total_errors
        );

        RunReport {
            server: self.executor.server(),
            network: self.executor.network(),
            stats,
            dispatched,
            trigger: self.lifecycle.trigger(),
        }
    }
}
