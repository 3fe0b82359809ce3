use serde::Serialize;

use super::client::{ApiClient, ApiError, Envelope};
use crate::model::{Entreprise, TypePeriode};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntreprise {
    pub nom: String,
    pub email: String,
    pub telephone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    pub devise: String,
    pub type_periode: TypePeriode,
    pub couleur_primaire: String,
    pub couleur_secondaire: String,
}

pub async fn list(api: &ApiClient) -> Result<Vec<Entreprise>, ApiError> {
    let envelope: Envelope<Vec<Entreprise>> = api.get_json("/entreprise").await?;
    Ok(envelope.data)
}

pub async fn get(api: &ApiClient, id: u64) -> Result<Entreprise, ApiError> {
    let envelope: Envelope<Entreprise> = api.get_json(&format!("/entreprise/{id}")).await?;
    Ok(envelope.data)
}

pub async fn create(api: &ApiClient, data: &CreateEntreprise) -> Result<Entreprise, ApiError> {
    api.post_json("/entreprise", data).await
}

pub async fn update(
    api: &ApiClient,
    id: u64,
    data: &CreateEntreprise,
) -> Result<Entreprise, ApiError> {
    api.put_json(&format!("/entreprise/{id}"), data).await
}

pub async fn delete(api: &ApiClient, id: u64) -> Result<(), ApiError> {
    api.delete(&format!("/entreprise/{id}")).await
}

/// Close an entreprise without deleting its history.
pub async fn fermer(api: &ApiClient, id: u64) -> Result<Entreprise, ApiError> {
    api.put_empty(&format!("/entreprise/{id}/fermer")).await
}
