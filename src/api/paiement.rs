use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ApiClient, ApiError};
use crate::bus::{DomainEvent, EventBus, PaiementCreated};
use crate::model::{ModePaiement, Paiement};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaiement {
    pub payslip_id: u64,
    pub montant: f64,
    pub mode: ModePaiement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_paiement: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_recu: Option<String>,
}

/// Current-month aggregates, computed server-side.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsMoisCourant {
    pub actifs: u32,
    pub masse_salariale: f64,
    pub montant_paye: f64,
    pub montant_restant: f64,
}

/// Record a payment against a payslip.
///
/// The `PaiementCreated` event is published only after the API confirmed the
/// payment; a failed call emits nothing, so dashboards never show a payment
/// that did not happen. Fields missing from the response fall back to the
/// request values.
pub async fn payer_payslip(
    api: &ApiClient,
    bus: &EventBus,
    data: &CreatePaiement,
) -> Result<Value, ApiError> {
    let response: Value = api.post_json("/paiement", data).await?;

    let montant = field(&response, "montant")
        .and_then(Value::as_f64)
        .unwrap_or(data.montant);
    let payslip_id = field(&response, "payslipId")
        .and_then(Value::as_u64)
        .unwrap_or(data.payslip_id);

    bus.emit(&DomainEvent::PaiementCreated(PaiementCreated {
        montant,
        payslip_id,
    }));
    tracing::info!(payslip_id, montant, "paiement enregistré");

    Ok(response)
}

// Looks at the top level first, then under "data".
fn field<'a>(response: &'a Value, name: &str) -> Option<&'a Value> {
    response
        .get(name)
        .or_else(|| response.get("data").and_then(|d| d.get(name)))
}

pub async fn list_for_payslip(api: &ApiClient, payslip_id: u64) -> Result<Vec<Paiement>, ApiError> {
    api.get_json(&format!("/paiement/payslip/{payslip_id}"))
        .await
}

pub async fn stats_mois_courant(
    api: &ApiClient,
    entreprise_id: u64,
) -> Result<StatsMoisCourant, ApiError> {
    api.get_json(&format!(
        "/paiement/stats/entreprise/{entreprise_id}/mois-courant"
    ))
    .await
}
