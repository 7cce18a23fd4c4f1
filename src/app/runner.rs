use std::sync::Arc;

use tracing::debug;

use crate::config::RunSettings;
use crate::engine::{Lifecycle, ProbeEngine};
use crate::error::AppResult;
use crate::probe::DnsResolver;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

use super::summary;

/// Runs one probing session to completion and prints its report.
pub(crate) async fn run_probe(settings: &RunSettings) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let lifecycle = Arc::new(Lifecycle::new());
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx, &lifecycle);

    let resolver = Arc::new(DnsResolver::new(settings.network));
    let engine = ProbeEngine::new(settings, resolver, Arc::clone(&lifecycle))?;
    let report = engine.run(&shutdown_tx).await;

    signal_handle.abort();
    debug!(
        "Run finished after {} dispatched probes ({:?}).",
        report.dispatched, report.trigger
    );
    summary::print_report(&report);
    Ok(())
}
