use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Bad DNS server '{value}': {source}")]
    InvalidServer {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("Bad network type '{value}'. Use udp or tcp.")]
    InvalidNetwork { value: String },
    #[error("Unsupported record type '{value}'.")]
    InvalidRecordType { value: String },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Need at least one hostname (pass hosts as arguments or use --file).")]
    NoHosts,
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Failed to build runtime: {source}")]
    RuntimeBuildFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
