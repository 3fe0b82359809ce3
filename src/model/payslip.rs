use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutPayslip {
    EnAttente,
    Partiel,
    Paye,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    pub id: u64,
    pub employe_id: u64,
    #[serde(default)]
    pub payrun_id: Option<u64>,
    #[serde(default)]
    pub brut: Option<f64>,
    #[serde(default)]
    pub deductions: Option<f64>,
    #[serde(default)]
    pub impot_revenu: Option<f64>,
    #[serde(default)]
    pub cotisation_sociale: Option<f64>,
    pub net_a_payer: f64,
    #[serde(default)]
    pub periode: Option<String>,
    #[serde(default)]
    pub approuve_admin: bool,
    pub statut: StatutPayslip,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payslip {
    pub fn est_en_attente(&self) -> bool {
        self.statut == StatutPayslip::EnAttente
    }
}
