use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_value;
use crate::error::ValidationError;

/// Settings accepted from `hey-phases.toml` / `hey-phases.json`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub periods: Option<Vec<DurationValue>>,
    pub connections: Option<Vec<u64>>,
    pub rate: Option<Vec<u64>>,
    pub random: Option<usize>,
    pub seed: Option<u64>,
    pub executable: Option<String>,
}

/// Either whole seconds (`90`) or a duration string (`"1m30s"`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
