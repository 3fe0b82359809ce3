use serde::Serialize;

use super::client::{ApiClient, ApiError};
use crate::model::{Payslip, StatutPayslip};
use crate::payroll;

/// How the deduction figures on a new payslip were produced.
///
/// The derived rule is authoritative; the manual mode exists for corrections
/// entered by an admin and is never mixed silently with the derived one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeDeductions {
    /// Deductions computed from `brut` by [`payroll::compute_deductions`].
    Derive,
    /// Free-form total supplied by the caller; itemized fields stay empty.
    Manuel { deductions: f64 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayslip {
    pub employe_id: u64,
    pub payrun_id: u64,
    pub brut: f64,
    pub deductions: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impot_revenu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cotisation_sociale: Option<f64>,
    pub net_a_payer: f64,
    pub statut: StatutPayslip,
}

impl CreatePayslip {
    /// Build the creation payload. The server may recompute and override
    /// these figures; what we send is a preview, not a trust boundary.
    pub fn new(
        employe_id: u64,
        payrun_id: u64,
        brut: f64,
        mode: ModeDeductions,
        statut: StatutPayslip,
    ) -> Self {
        match mode {
            ModeDeductions::Derive => {
                let d = payroll::compute_deductions(brut);
                Self {
                    employe_id,
                    payrun_id,
                    brut,
                    deductions: d.total_deductions,
                    impot_revenu: Some(d.impot_revenu),
                    cotisation_sociale: Some(d.cotisation_sociale),
                    net_a_payer: d.net_a_payer,
                    statut,
                }
            }
            ModeDeductions::Manuel { deductions } => Self {
                employe_id,
                payrun_id,
                brut,
                deductions,
                impot_revenu: None,
                cotisation_sociale: None,
                net_a_payer: brut - deductions,
                statut,
            },
        }
    }
}

pub async fn create(api: &ApiClient, data: &CreatePayslip) -> Result<Payslip, ApiError> {
    api.post_json("/payslip", data).await
}

pub async fn list_for_employe(api: &ApiClient, employe_id: u64) -> Result<Vec<Payslip>, ApiError> {
    api.get_json(&format!("/payslip/employe/{employe_id}")).await
}

pub async fn list_for_payrun(api: &ApiClient, payrun_id: u64) -> Result<Vec<Payslip>, ApiError> {
    api.get_json(&format!("/payslip/payrun/{payrun_id}")).await
}
