//! Core library for the `dnsprobe` CLI.
//!
//! `dnsprobe` sends DNS queries to a single server at a fixed cadence, runs
//! every query as its own task, and prints latency and error statistics once
//! a signal or the probe budget ends the run and every in-flight query has
//! finished. The binary is the primary interface; the modules below are
//! exposed so the engine can be driven with a custom `probe::Resolver`.
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;

mod app;
mod entry;
mod logger;

pub use entry::run;
