use serde::{Deserialize, Serialize};

/// column names of the stop coordinate table
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct StopTableColumns {
    pub stop_id: String,
    pub latitude: String,
    pub longitude: String,
    pub region: String,
    pub local_authority: String,
}

impl Default for StopTableColumns {
    fn default() -> Self {
        Self {
            stop_id: String::from("stop_id"),
            latitude: String::from("latitude"),
            longitude: String::from("longitude"),
            region: String::from("region_code"),
            local_authority: String::from("local_authority_code"),
        }
    }
}
