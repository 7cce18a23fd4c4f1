use super::*;
use crate::args::{Network, QueryType};
use crate::error::{AppError, AppResult, ProbeError};
use crate::probe::{Exchange, ProbeQuery, Resolver};
use crate::shutdown::request_shutdown;
use crate::shutdown_handlers::shutdown_channel;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

fn run_paused_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

/// Returns scripted round-trip times in order after an optional delay.
struct ScriptedResolver {
    rtts: Mutex<VecDeque<Duration>>,
    delay: Duration,
    completed: AtomicU64,
}

impl ScriptedResolver {
    fn new(rtts: &[u64], delay: Duration) -> Self {
        Self {
            rtts: Mutex::new(rtts.iter().copied().map(Duration::from_millis).collect()),
            delay,
            completed: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn exchange(
        &self,
        _query: &ProbeQuery,
        _server: SocketAddr,
    ) -> Result<Exchange, ProbeError> {
        let rtt = self
            .rtts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Duration::from_millis(1));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(Exchange { answers: 1, rtt })
    }
}

fn settings(interval: Duration, budget: Option<u64>) -> RunSettings {
    RunSettings {
        server: SocketAddr::from((Ipv4Addr::LOCALHOST, 53)),
        network: Network::Udp,
        interval,
        budget,
        timeout: Duration::from_secs(5),
        record_type: QueryType::A,
        seed: Some(1),
        hosts: vec!["example.com".to_owned(), "example.org".to_owned()],
    }
}

#[test]
fn budget_take_stops_at_zero() -> AppResult<()> {
    let budget = RemainingBudget::new(Some(2));
    let taken = [budget.try_take(), budget.try_take(), budget.try_take()];
    if taken != [Some(1), Some(0), None] {
        return Err(AppError::validation(format!(
            "Unexpected takes: {:?}",
            taken
        )));
    }
    if budget.remaining() != 0 {
        return Err(AppError::validation("Budget went below zero"));
    }
    let unbounded = RemainingBudget::new(None);
    if unbounded.try_take() != Some(u64::MAX.saturating_sub(1)) {
        return Err(AppError::validation("Unbounded budget should decrement"));
    }
    Ok(())
}

#[test]
fn lifecycle_transitions_once() -> AppResult<()> {
    let lifecycle = Lifecycle::new();
    if lifecycle.mark_reported() {
        return Err(AppError::validation("Report must follow drain"));
    }
    if !lifecycle.begin_drain(DrainTrigger::BudgetExhausted) {
        return Err(AppError::validation("First drain should start"));
    }
    if lifecycle.begin_drain(DrainTrigger::Signal) {
        return Err(AppError::validation("Second drain should be a no-op"));
    }
    if lifecycle.trigger() != Some(DrainTrigger::BudgetExhausted) {
        return Err(AppError::validation("Trigger was overwritten"));
    }
    if !lifecycle.mark_reported() || lifecycle.phase() != Phase::Reported {
        return Err(AppError::validation("Expected Reported phase"));
    }
    if lifecycle.begin_drain(DrainTrigger::Signal) {
        return Err(AppError::validation("Reported is terminal"));
    }
    Ok(())
}

#[test]
fn repeated_shutdown_requests_are_idempotent() -> AppResult<()> {
    let lifecycle = Lifecycle::new();
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::Signal);
    request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::Signal);
    request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::BudgetExhausted);

    if shutdown_rx.try_recv().is_err() {
        return Err(AppError::validation("Expected one shutdown notification"));
    }
    if shutdown_rx.try_recv().is_ok() {
        return Err(AppError::validation("Expected a single notification"));
    }
    if lifecycle.trigger() != Some(DrainTrigger::Signal) {
        return Err(AppError::validation("Unexpected trigger"));
    }
    Ok(())
}

#[test]
fn scripted_latencies_produce_expected_report() -> AppResult<()> {
    run_paused_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let resolver = Arc::new(ScriptedResolver::new(&[10, 20, 30], Duration::ZERO));
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(100), Some(3)),
            resolver,
            Arc::clone(&lifecycle),
        )?;
        let report = engine.run(&shutdown_tx).await;

        if report.stats.total_issued != 3 || report.stats.total_errors != 0 {
            return Err(AppError::validation("Unexpected counters"));
        }
        if report.stats.average_latency() != Some(Duration::from_millis(20)) {
            return Err(AppError::validation("Expected 20ms average"));
        }
        if report.stats.min_latency != Some(Duration::from_millis(10))
            || report.stats.max_latency != Some(Duration::from_millis(30))
        {
            return Err(AppError::validation("Unexpected min/max"));
        }
        if report.stats.error_percent_text() != "0.000000" {
            return Err(AppError::validation("Expected 0.000000 error percent"));
        }
        if report.trigger != Some(DrainTrigger::BudgetExhausted)
            || lifecycle.phase() != Phase::Reported
        {
            return Err(AppError::validation("Expected budget-driven report"));
        }
        Ok(())
    })
}

#[test]
fn budget_drains_slow_probes_before_report() -> AppResult<()> {
    run_paused_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let resolver = Arc::new(ScriptedResolver::new(&[], Duration::from_secs(2)));
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(10), Some(5)),
            Arc::clone(&resolver) as Arc<dyn Resolver>,
            Arc::clone(&lifecycle),
        )?;
        let report = engine.run(&shutdown_tx).await;

        if report.dispatched != 5 {
            return Err(AppError::validation(format!(
                "Expected 5 dispatched, got {}",
                report.dispatched
            )));
        }
        if resolver.completed.load(Ordering::SeqCst) != 5 {
            return Err(AppError::validation("Report built before all probes finished"));
        }
        if report.stats.total_issued != 5 {
            return Err(AppError::validation(format!(
                "Expected 5 issued, got {}",
                report.stats.total_issued
            )));
        }
        Ok(())
    })
}

#[test]
fn signal_before_first_tick_reports_nothing() -> AppResult<()> {
    run_paused_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(100), None),
            Arc::new(ScriptedResolver::new(&[], Duration::ZERO)),
            Arc::clone(&lifecycle),
        )?;
        request_shutdown(&lifecycle, &shutdown_tx, DrainTrigger::Signal);
        let report = engine.run(&shutdown_tx).await;

        if report.dispatched != 0 || report.stats.total_issued != 0 {
            return Err(AppError::validation("Expected nothing dispatched"));
        }
        if report.stats.average_latency().is_some() {
            return Err(AppError::validation("Expected no latency"));
        }
        if report.stats.error_percent_text() != "0.000000" {
            return Err(AppError::validation("Expected 0.000000 error percent"));
        }
        if report.trigger != Some(DrainTrigger::Signal) {
            return Err(AppError::validation("Expected signal trigger"));
        }
        Ok(())
    })
}

#[test]
fn signal_mid_run_waits_for_in_flight_probes() -> AppResult<()> {
    run_paused_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let resolver = Arc::new(ScriptedResolver::new(&[], Duration::from_secs(1)));
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(100), None),
            Arc::clone(&resolver) as Arc<dyn Resolver>,
            Arc::clone(&lifecycle),
        )?;

        let signal_lifecycle = Arc::clone(&lifecycle);
        let signal_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(350)).await;
            request_shutdown(&signal_lifecycle, &signal_tx, DrainTrigger::Signal);
        });
        let report = engine.run(&shutdown_tx).await;

        if report.dispatched != 3 {
            return Err(AppError::validation(format!(
                "Expected 3 dispatched, got {}",
                report.dispatched
            )));
        }
        if report.stats.total_issued != report.dispatched
            || resolver.completed.load(Ordering::SeqCst) != report.dispatched
        {
            return Err(AppError::validation("In-flight probes were dropped"));
        }
        Ok(())
    })
}

#[test]
fn drain_started_stops_dispatch_before_broadcast() -> AppResult<()> {
    run_paused_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(100), None),
            Arc::new(ScriptedResolver::new(&[], Duration::ZERO)),
            Arc::clone(&lifecycle),
        )?;

        let late_lifecycle = Arc::clone(&lifecycle);
        let late_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            if !late_lifecycle.begin_drain(DrainTrigger::Signal) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(300)).await;
            drop(late_tx.send(()));
        });
        let report = engine.run(&shutdown_tx).await;

        if report.dispatched != 1 {
            return Err(AppError::validation(format!(
                "Expected 1 dispatched once draining, got {}",
                report.dispatched
            )));
        }
        if report.stats.total_issued != 1 || report.trigger != Some(DrainTrigger::Signal) {
            return Err(AppError::validation("Unexpected report after early drain"));
        }
        Ok(())
    })
}

#[test]
fn high_rate_run_loses_no_outcomes() -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(async {
        let (shutdown_tx, _) = shutdown_channel();
        let lifecycle = Arc::new(Lifecycle::new());
        let engine = ProbeEngine::new(
            &settings(Duration::from_millis(1), Some(300)),
            Arc::new(ScriptedResolver::new(&[], Duration::from_millis(5))),
            Arc::clone(&lifecycle),
        )?;
        let report = engine.run(&shutdown_tx).await;

        if report.dispatched != 300 || report.stats.total_issued != 300 {
            return Err(AppError::validation(format!(
                "Expected 300 issued, got {} of {}",
                report.stats.total_issued, report.dispatched
            )));
        }
        if report.stats.total_errors > report.stats.total_issued {
            return Err(AppError::validation("Errors exceed issued"));
        }
        Ok(())
    })
}
