use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{AppError, AppResult, ConfigError, ValidationError};

/// Fixed, non-empty list of hosts sampled uniformly with replacement.
///
/// Each pick is independent, so hosts are not guaranteed equal coverage.
#[derive(Debug)]
pub struct TargetList {
    hosts: Vec<String>,
    rng: Mutex<StdRng>,
}

impl TargetList {
    /// Creates a target list. With a seed the pick sequence is reproducible.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoHosts` when `hosts` is empty.
    pub fn new(hosts: Vec<String>, seed: Option<u64>) -> Result<Self, ValidationError> {
        if hosts.is_empty() {
            return Err(ValidationError::NoHosts);
        }
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            hosts,
            rng: Mutex::new(rng),
        })
    }

    /// Picks one host uniformly at random.
    #[must_use]
    pub fn pick(&self) -> Option<&str> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.hosts.choose(&mut *rng).map(String::as_str)
    }
}

/// Merges hosts from `file` (one per line) with `positional` hosts.
///
/// Blank lines are skipped and surrounding whitespace is trimmed. File
/// entries come first.
///
/// # Errors
///
/// Returns an error when the hosts file cannot be read.
pub fn load_targets(file: Option<&Path>, positional: &[String]) -> AppResult<Vec<String>> {
    let mut hosts = Vec::new();
    if let Some(path) = file {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::config(ConfigError::ReadHostsFile {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        hosts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
    }
    hosts.extend(
        positional
            .iter()
            .map(|host| host.trim())
            .filter(|host| !host.is_empty())
            .map(str::to_owned),
    );
    Ok(hosts)
}
