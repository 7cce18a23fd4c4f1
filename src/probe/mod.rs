//! Single-probe execution: target selection, the resolver seam, and the
//! DNS wire exchange.
mod dns;
mod executor;
mod resolver;
mod targets;
mod types;


pub use dns::DnsResolver;
pub use executor::{ProbeExecutor, ProbeParams};
pub use resolver::{Exchange, ProbeQuery, Resolver};
pub use targets::{TargetList, load_targets};
pub use types::{FailureReason, ProbeOutcome, ProbeTicket};
