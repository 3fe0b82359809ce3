use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TypePeriode {
    Mensuel,
    Hebdo,
    Journalier,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutPayRun {
    Brouillon,
    Approuve,
    Cloture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRun {
    pub id: u64,
    pub entreprise_id: u64,
    pub periode_debut: DateTime<Utc>,
    pub periode_fin: DateTime<Utc>,
    pub type_periode: TypePeriode,
    pub statut: StatutPayRun,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PayRun {
    /// A payrun only accepts new payslips while still a draft.
    pub fn est_modifiable(&self) -> bool {
        self.statut == StatutPayRun::Brouillon
    }
}
