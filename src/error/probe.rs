use thiserror::Error;

/// Failure of a single resolution exchange. Never fatal; the probe task
/// records it and moves on.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("i/o timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },
    #[error("invalid query name '{name}': {source}")]
    InvalidName {
        name: String,
        #[source]
        source: hickory_proto::error::ProtoError,
    },
    #[error("failed to encode query: {source}")]
    Encode {
        #[source]
        source: hickory_proto::error::ProtoError,
    },
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: hickory_proto::error::ProtoError,
    },
    #[error("query too large for TCP framing ({len} bytes)")]
    MessageTooLarge { len: usize },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{message}")]
    Other { message: String },
}

impl ProbeError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout { .. })
    }
}
