//! Payroll evolution chart: total gross per calendar month, trailing window.

use chrono::{DateTime, Datelike, Utc};
use futures::future::join_all;

use crate::api::client::{ApiClient, ApiError};
use crate::api::payslip;
use crate::model::Payslip;
use crate::utils::employe_cache;

const FENETRE_MOIS: u32 = 6;

const MOIS_COURTS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollChartPoint {
    /// French short label, e.g. "sept. 26".
    pub mois: String,
    pub total: f64,
}

/// Bucket gross amounts by calendar month over the trailing window, oldest
/// month first. Payslips without a `brut` count for zero.
pub fn grouper_par_mois(payslips: &[Payslip], maintenant: DateTime<Utc>) -> Vec<PayrollChartPoint> {
    let courant = maintenant.year() * 12 + maintenant.month0() as i32;

    (0..FENETRE_MOIS as i32)
        .rev()
        .map(|i| {
            let index = courant - i;
            let annee = index.div_euclid(12);
            let mois0 = index.rem_euclid(12) as usize;

            let total = payslips
                .iter()
                .filter(|p| {
                    p.created_at.year() == annee && p.created_at.month0() as usize == mois0
                })
                .filter_map(|p| p.brut)
                .sum();

            PayrollChartPoint {
                mois: format!("{} {:02}", MOIS_COURTS[mois0], annee.rem_euclid(100)),
                total,
            }
        })
        .collect()
}

/// Fetch every employé's payslips and build the chart series.
pub async fn charger(
    api: &ApiClient,
    entreprise_id: u64,
) -> Result<Vec<PayrollChartPoint>, ApiError> {
    let employes = employe_cache::fetch_employes_cached(api, entreprise_id).await?;

    let fetches = employes.iter().map(|e| payslip::list_for_employe(api, e.id));
    let payslips: Vec<Payslip> = join_all(fetches)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();

    Ok(grouper_par_mois(&payslips, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatutPayslip;
    use chrono::TimeZone;

    fn payslip(brut: Option<f64>, created_at: DateTime<Utc>) -> Payslip {
        Payslip {
            id: 1,
            employe_id: 1,
            payrun_id: None,
            brut,
            deductions: None,
            impot_revenu: None,
            cotisation_sociale: None,
            net_a_payer: 0.0,
            periode: None,
            approuve_admin: false,
            statut: StatutPayslip::EnAttente,
            created_at,
            updated_at: created_at,
        }
    }

    fn date(annee: i32, mois: u32, jour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(annee, mois, jour, 12, 0, 0).unwrap()
    }

    #[test]
    fn groups_trailing_six_months_oldest_first() {
        let maintenant = date(2025, 9, 15);
        let payslips = vec![
            payslip(Some(100_000.0), date(2025, 9, 1)),
            payslip(Some(50_000.0), date(2025, 9, 20)),
            payslip(Some(80_000.0), date(2025, 7, 3)),
            payslip(Some(999.0), date(2025, 2, 1)), // outside the window
            payslip(None, date(2025, 9, 5)),        // no brut: counts for zero
        ];

        let points = grouper_par_mois(&payslips, maintenant);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].mois, "avr. 25");
        assert_eq!(points[5].mois, "sept. 25");
        assert_eq!(points[5].total, 150_000.0);
        assert_eq!(points[3].total, 80_000.0); // juillet
        assert_eq!(points[0].total, 0.0);
    }

    #[test]
    fn window_crosses_year_boundary() {
        let points = grouper_par_mois(&[], date(2026, 2, 10));
        assert_eq!(points[0].mois, "sept. 25");
        assert_eq!(points[5].mois, "févr. 26");
    }
}
