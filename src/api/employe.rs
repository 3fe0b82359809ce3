use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError, Envelope};
use crate::model::{Employe, StatutEmploye, TypeContrat};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmploye {
    pub entreprise_id: u64,
    pub nom_complet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poste: Option<String>,
    pub type_contrat: TypeContrat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salaire_fixe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taux_journalier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honoraire: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordonnees_bancaires: Option<String>,
    pub statut: StatutEmploye,
}

pub async fn create(api: &ApiClient, data: &CreateEmploye) -> Result<Employe, ApiError> {
    let envelope: Envelope<Employe> = api.post_json("/employe", data).await?;
    Ok(envelope.data)
}

pub async fn list(api: &ApiClient, entreprise_id: u64) -> Result<Vec<Employe>, ApiError> {
    api.get_json(&format!("/employe/entreprise/{entreprise_id}"))
        .await
}

// --- pointage -------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DernierPointage {
    pub date: DateTime<Utc>,
}

/// Record a pointage (badge scan) for today.
pub async fn pointer(api: &ApiClient, employe_id: u64) -> Result<serde_json::Value, ApiError> {
    api.post_empty(&format!("/employe/{employe_id}/pointer"))
        .await
}

pub async fn nb_pointages(
    api: &ApiClient,
    employe_id: u64,
    debut: NaiveDate,
    fin: NaiveDate,
) -> Result<u32, ApiError> {
    api.get_json(&format!(
        "/employe/{employe_id}/pointages?start={debut}&end={fin}"
    ))
    .await
}

pub async fn dernier_pointage(
    api: &ApiClient,
    employe_id: u64,
) -> Result<Option<DernierPointage>, ApiError> {
    api.get_json(&format!("/employe/{employe_id}/last-pointage"))
        .await
}
