//! Configuration loading, merging, and validation.
mod apply;
mod loader;
mod settings;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use settings::{RunSettings, resolve_interval, resolve_server};

pub(crate) use loader::DEFAULT_CONFIG_FILES;
#[cfg(test)]
pub(crate) use loader::load_config_file;
