//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::ProbeArgs;
pub use parsers::parse_duration_value;
pub use types::{Network, QueryType};
