use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::engine::{DrainTrigger, Lifecycle};

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Starts the drain if the run is still `Running` and wakes every
/// subscriber. Later calls only log.
pub fn request_shutdown(lifecycle: &Lifecycle, shutdown_tx: &ShutdownSender, trigger: DrainTrigger) {
    if lifecycle.begin_drain(trigger) {
        info!("Shutdown requested ({}); draining in-flight probes.", trigger);
        drop(shutdown_tx.send(()));
    } else {
        debug!("Shutdown already in progress; ignoring {}.", trigger);
    }
}
