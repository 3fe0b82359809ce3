use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payrun::TypePeriode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entreprise {
    pub id: u64,
    pub nom: String,
    pub email: String,
    pub telephone: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    /// Display-only; no conversion happens client-side.
    pub devise: String,
    pub type_periode: TypePeriode,
    #[serde(default)]
    pub statut: Option<String>,
    pub couleur_primaire: String,
    pub couleur_secondaire: String,
    #[serde(default)]
    pub createur_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
