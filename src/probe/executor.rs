use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::args::{Network, QueryType};
use crate::error::ProbeError;
use crate::metrics::{ProbeStats, format_duration};

use super::resolver::{Exchange, ProbeQuery, Resolver};
use super::targets::TargetList;
use super::types::{FailureReason, ProbeOutcome, ProbeTicket};

/// Runs single probes against the configured server and folds each outcome
/// into the shared statistics.
pub struct ProbeExecutor {
    targets: TargetList,
    resolver: Arc<dyn Resolver>,
    stats: Arc<ProbeStats>,
    server: SocketAddr,
    network: Network,
    record_type: QueryType,
    timeout: Duration,
}

/// Fixed parameters shared by every probe of a run.
#[derive(Debug, Clone, Copy)]
pub struct ProbeParams {
    pub server: SocketAddr,
    pub network: Network,
    pub record_type: QueryType,
    pub timeout: Duration,
}

impl ProbeExecutor {
    #[must_use]
    pub fn new(
        targets: TargetList,
        resolver: Arc<dyn Resolver>,
        stats: Arc<ProbeStats>,
        params: ProbeParams,
    ) -> Self {
        Self {
            targets,
            resolver,
            stats,
            server: params.server,
            network: params.network,
            record_type: params.record_type,
            timeout: params.timeout,
        }
    }

    #[must_use]
    pub const fn stats(&self) -> &Arc<ProbeStats> {
        &self.stats
    }

    #[must_use]
    pub const fn server(&self) -> SocketAddr {
        self.server
    }

    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Issues one query and records its outcome exactly once.
    pub async fn execute(&self, ticket: ProbeTicket) -> ProbeOutcome {
        let Some(target) = self.targets.pick() else {
            let missing = Err(ProbeError::Other {
                message: "no target to resolve".to_owned(),
            });
            return self.finish(ticket, "-", &missing);
        };

        let query = ProbeQuery::new(target, self.record_type);
        let result = match tokio::time::timeout(
            self.timeout,
            self.resolver.exchange(&query, self.server),
        )
        .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(ProbeError::Timeout {
                timeout_ms: self.timeout.as_millis(),
            }),
        };
        self.finish(ticket, target, &result)
    }

    /// Classifies `result`, folds it into the stats and prints its line.
    /// Every completed probe goes through here.
    pub(crate) fn finish(
        &self,
        ticket: ProbeTicket,
        target: &str,
        result: &Result<Exchange, ProbeError>,
    ) -> ProbeOutcome {
        let outcome = classify(result);
        self.stats.record(&outcome);

        println!(
            "{}",
            diagnostic_line(ticket.sequence, self.server, target, result)
        );
        debug!(
            "Probe {} finished as {:?} ({} left in budget).",
            ticket.sequence,
            outcome,
            ticket.remaining
        );
        outcome
    }
}

pub(crate) fn classify(result: &Result<Exchange, ProbeError>) -> ProbeOutcome {
    match result {
        Err(err) => ProbeOutcome::Failure {
            reason: FailureReason::from_error(err),
        },
        Ok(exchange) if exchange.answers == 0 => ProbeOutcome::Failure {
            reason: FailureReason::EmptyResult,
        },
        Ok(exchange) => ProbeOutcome::Success {
            latency: exchange.rtt,
        },
    }
}

pub(crate) fn diagnostic_line(
    sequence: u64,
    server: SocketAddr,
    target: &str,
    result: &Result<Exchange, ProbeError>,
) -> String {
    let action = format!("Probe {} {} resolve {}", sequence, server.ip(), target);
    match result {
        Err(err) => format!("{} err: {}", action, err),
        Ok(exchange) if exchange.answers == 0 => format!("{} no result", action),
        Ok(exchange) => format!("{} ok {}", action, format_duration(exchange.rtt)),
    }
}
