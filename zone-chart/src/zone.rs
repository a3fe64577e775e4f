use crate::error::ZoneError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone label as stored by the ingestion side: either `"A"` or `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneName {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneName::Text(s) => f.write_str(s),
            ZoneName::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One heart-rate zone. Extra fields in the stored object (e.g. `max`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: ZoneName,
    /// Lower bound of the zone in bpm.
    pub min: f64,
}

/// Decode the `zone_data` column of one activity.
pub fn decode_zones(activity_id: &str, payload: &str) -> Result<Vec<Zone>, ZoneError> {
    serde_json::from_str(payload).map_err(|source| ZoneError::Payload {
        activity_id: activity_id.to_string(),
        source,
    })
}
