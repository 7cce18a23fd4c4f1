use std::fmt;
use std::time::Duration;

use crate::error::ProbeError;

/// Why a probe did not produce a usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Timeout,
    ProtocolError,
    EmptyResult,
}

impl FailureReason {
    #[must_use]
    pub const fn from_error(error: &ProbeError) -> Self {
        if error.is_timeout() {
            FailureReason::Timeout
        } else {
            FailureReason::ProtocolError
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureReason::Timeout => "timeout",
            FailureReason::ProtocolError => "protocol error",
            FailureReason::EmptyResult => "no result",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of exactly one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { latency: Duration },
    Failure { reason: FailureReason },
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }
}

/// Labels handed to a probe at dispatch time. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    pub sequence: u64,
    pub remaining: u64,
}
