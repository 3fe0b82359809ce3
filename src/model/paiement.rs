use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ModePaiement {
    Especes,
    Virement,
    OrangeMoney,
    Wave,
    Autre,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paiement {
    pub id: u64,
    pub payslip_id: u64,
    pub montant: f64,
    pub mode: ModePaiement,
    #[serde(default)]
    pub date_paiement: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pdf_recu: Option<String>,
    pub created_at: DateTime<Utc>,
}
