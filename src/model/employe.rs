use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeContrat {
    Journalier,
    Fixe,
    Honoraire,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatutEmploye {
    Actif,
    Inactif,
    Vacataire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: u64,
    pub employe_id: u64,
    pub matricule: String,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employe {
    pub id: u64,
    pub entreprise_id: u64,
    pub nom_complet: String,
    #[serde(default)]
    pub poste: Option<String>,
    pub type_contrat: TypeContrat,
    #[serde(default)]
    pub salaire_fixe: Option<f64>,
    #[serde(default)]
    pub taux_journalier: Option<f64>,
    #[serde(default)]
    pub honoraire: Option<f64>,
    #[serde(default)]
    pub coordonnees_bancaires: Option<String>,
    pub statut: StatutEmploye,
    pub actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub badge: Option<Badge>,
}

impl Employe {
    /// Base remuneration for the contract type, when the field is filled in.
    pub fn remuneration_de_base(&self) -> Option<f64> {
        match self.type_contrat {
            TypeContrat::Fixe => self.salaire_fixe,
            TypeContrat::Journalier => self.taux_journalier,
            TypeContrat::Honoraire => self.honoraire,
        }
    }
}
