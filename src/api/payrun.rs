use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::{ApiClient, ApiError};
use crate::model::{PayRun, StatutPayRun, TypePeriode};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayrun {
    pub entreprise_id: u64,
    pub periode_debut: DateTime<Utc>,
    pub periode_fin: DateTime<Utc>,
    pub type_periode: TypePeriode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<StatutPayRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetStatut {
    statut: StatutPayRun,
}

pub async fn create(api: &ApiClient, data: &CreatePayrun) -> Result<PayRun, ApiError> {
    api.post_json("/payrun", data).await
}

pub async fn list(api: &ApiClient, entreprise_id: u64) -> Result<Vec<PayRun>, ApiError> {
    api.get_json(&format!("/payrun/entreprise/{entreprise_id}"))
        .await
}

/// Move a payrun through its lifecycle (BROUILLON → APPROUVE → CLOTURE).
pub async fn set_statut(
    api: &ApiClient,
    payrun_id: u64,
    statut: StatutPayRun,
) -> Result<PayRun, ApiError> {
    api.put_json(&format!("/payrun/{payrun_id}/statut"), &SetStatut { statut })
        .await
}
