use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tracing::warn;

use crate::args::defaults::DEFAULT_INTERVAL;
use crate::args::{Network, ProbeArgs, QueryType, parse_duration_value};
use crate::error::{AppError, AppResult, ValidationError};
use crate::probe::load_targets;

/// Validated run configuration handed to the engine.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub server: SocketAddr,
    pub network: Network,
    pub interval: Duration,
    pub budget: Option<u64>,
    pub timeout: Duration,
    pub record_type: QueryType,
    pub seed: Option<u64>,
    pub hosts: Vec<String>,
}

impl RunSettings {
    /// Validates CLI (and config-merged) arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the hosts file cannot be read, the host list is
    /// empty, or the server address is not an IP literal.
    pub fn from_args(args: &ProbeArgs) -> AppResult<Self> {
        let hosts = load_targets(args.file.as_deref(), &args.hosts)?;
        if hosts.is_empty() {
            return Err(AppError::validation(ValidationError::NoHosts));
        }
        let interval = resolve_interval(&args.interval);
        let server = resolve_server(&args.server, args.port)?;

        Ok(Self {
            server,
            network: args.network,
            interval,
            budget: args.count,
            timeout: args.timeout,
            record_type: args.record_type,
            seed: args.seed,
            hosts,
        })
    }
}

/// Resolves the tick interval, falling back to 100ms for zero or
/// unparsable values. Unlike `--timeout`, a bare number other than `0`
/// carries no unit here and is rejected.
#[must_use]
pub fn resolve_interval(value: &str) -> Duration {
    let trimmed = value.trim();
    if !trimmed.is_empty()
        && trimmed.chars().all(|ch| ch.is_ascii_digit())
        && trimmed.chars().any(|ch| ch != '0')
    {
        warn!(
            "Interval '{}' is missing a unit; using {}ms.",
            value,
            DEFAULT_INTERVAL.as_millis()
        );
        return DEFAULT_INTERVAL;
    }
    match parse_duration_value(trimmed) {
        Ok(interval) if interval.is_zero() => DEFAULT_INTERVAL,
        Ok(interval) => interval,
        Err(err) => {
            warn!(
                "Invalid interval '{}' ({}); using {}ms.",
                value,
                err,
                DEFAULT_INTERVAL.as_millis()
            );
            DEFAULT_INTERVAL
        }
    }
}

/// Parses the server IP literal and attaches the DNS port.
///
/// # Errors
///
/// Returns an error when `value` is not an IPv4 or IPv6 literal.
pub fn resolve_server(value: &str, port: u16) -> AppResult<SocketAddr> {
    let ip: IpAddr = value.trim().parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidServer {
            value: value.to_owned(),
            source: err,
        })
    })?;
    Ok(SocketAddr::new(ip, port))
}
