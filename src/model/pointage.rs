use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pointage {
    pub id: u64,
    pub employe_id: u64,
    pub date: DateTime<Utc>,
}
