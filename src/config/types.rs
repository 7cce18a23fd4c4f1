use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_value;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "server")]
    pub dns: Option<String>,
    #[serde(alias = "interval")]
    pub time: Option<String>,
    pub network: Option<String>,
    pub count: Option<u64>,
    pub file: Option<String>,
    pub hosts: Option<Vec<String>>,
    pub port: Option<u16>,
    pub timeout: Option<DurationValue>,
    #[serde(rename = "type", alias = "record_type")]
    pub record_type: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        let duration = match self {
            DurationValue::Seconds(secs) => Duration::from_secs(*secs),
            DurationValue::Text(text) => parse_duration_value(text)?,
        };
        if duration.is_zero() {
            return Err(ValidationError::DurationZero);
        }
        Ok(duration)
    }
}
