use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV: &str = "DNSPROBE_LOG";

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// probe lines and the report.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = std::env::var(LOG_ENV)
        .or_else(|_err| std::env::var("RUST_LOG"))
        .ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(directive.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn log_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    directive.map_or_else(
        || EnvFilter::new(default_level(verbose)),
        |value| {
            EnvFilter::try_new(value).unwrap_or_else(|_err| EnvFilter::new(default_level(verbose)))
        },
    )
}
