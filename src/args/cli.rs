use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{DEFAULT_INTERVAL_TEXT, DEFAULT_PORT, DEFAULT_SERVER, DEFAULT_TIMEOUT_TEXT};
use super::parsers::{parse_bool_env, parse_network, parse_query_type, parse_timeout_arg};
use super::types::{Network, QueryType};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Rate-controlled DNS prober - sends resolution requests to one server at a fixed cadence and reports latency and error statistics on exit."
)]
pub struct ProbeArgs {
    /// The address of the DNS server (IP literal)
    #[arg(long = "dns", short = 'd', default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Interval between two probes (e.g. 100ms, 1.5s, 1m30s). Zero or invalid falls back to 100ms.
    #[arg(long = "time", short = 't', default_value = DEFAULT_INTERVAL_TEXT)]
    pub interval: String,

    /// Transport used to resolve (udp or tcp, case-insensitive)
    #[arg(long, short = 'n', default_value = "udp", value_parser = parse_network)]
    pub network: Network,

    /// Maximum number of probes to send (unbounded when omitted)
    #[arg(long, short = 'c')]
    pub count: Option<u64>,

    /// File with one host name per line, merged before positional hosts
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// DNS server port
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-probe timeout (supports ns/us/ms/s/m/h)
    #[arg(long, default_value = DEFAULT_TIMEOUT_TEXT, value_parser = parse_timeout_arg)]
    pub timeout: Duration,

    /// Record type to query (a, aaaa, cname, mx, ns, ptr, soa, srv, txt)
    #[arg(long = "type", default_value = "a", value_parser = parse_query_type)]
    pub record_type: QueryType,

    /// Seed for random host selection (reproducible target order)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to config file (TOML/JSON). Defaults to ./dnsprobe.toml or ./dnsprobe.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by DNSPROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Host names to resolve
    #[arg(value_name = "HOST")]
    pub hosts: Vec<String>,
}
