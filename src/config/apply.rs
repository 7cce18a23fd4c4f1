use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Network, ProbeArgs, QueryType};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Options given on the
/// command line always win.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "server")
        && let Some(server) = config.dns.clone()
    {
        args.server = server;
    }

    if !is_cli(matches, "interval")
        && let Some(interval) = config.time.clone()
    {
        args.interval = interval;
    }

    if !is_cli(matches, "network")
        && let Some(network) = config.network.as_deref()
    {
        args.network = network
            .parse::<Network>()
            .map_err(|err| invalid_field("network", err))?;
    }

    if !is_cli(matches, "count")
        && let Some(count) = config.count
    {
        args.count = Some(count);
    }

    if !is_cli(matches, "file")
        && let Some(file) = config.file.as_ref()
    {
        args.file = Some(PathBuf::from(file));
    }

    if !is_cli(matches, "hosts")
        && let Some(hosts) = config.hosts.as_ref()
    {
        args.hosts.clone_from(hosts);
    }

    if !is_cli(matches, "port")
        && let Some(port) = config.port
    {
        args.port = port;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
    }

    if !is_cli(matches, "record_type")
        && let Some(record_type) = config.record_type.as_deref()
    {
        args.record_type = record_type
            .parse::<QueryType>()
            .map_err(|err| invalid_field("type", err))?;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
