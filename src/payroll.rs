use serde::{Deserialize, Serialize};

/// Impôt sur le revenu, flat rate.
pub const TAUX_IMPOT_REVENU: f64 = 0.18;

/// Above this gross amount the higher contribution rate applies (strict `>`).
pub const SEUIL_COTISATION: f64 = 250_000.0;

pub const TAUX_COTISATION_HAUT: f64 = 0.05;
pub const TAUX_COTISATION_BAS: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    pub impot_revenu: f64,
    pub cotisation_sociale: f64,
    pub total_deductions: f64,
    pub net_a_payer: f64,
}

/// Deduction breakdown for a gross salary.
///
/// Pure and deterministic: the preview shown before submission and the figures
/// sent to the API both come from this single function. No rounding is applied
/// here; formatting to the entreprise's currency is a display concern.
///
/// Callers must validate their input first (see [`parse_brut`]); this function
/// assumes a finite, non-negative `brut`.
pub fn compute_deductions(brut: f64) -> Deductions {
    let impot_revenu = brut * TAUX_IMPOT_REVENU;
    let taux_cotisation = if brut > SEUIL_COTISATION {
        TAUX_COTISATION_HAUT
    } else {
        TAUX_COTISATION_BAS
    };
    let cotisation_sociale = brut * taux_cotisation;
    let total_deductions = impot_revenu + cotisation_sociale;

    Deductions {
        impot_revenu,
        cotisation_sociale,
        total_deductions,
        net_a_payer: brut - total_deductions,
    }
}

/// Parse a gross salary typed into a form field.
///
/// Returns `None` for empty, non-numeric, negative or non-finite input, so the
/// caller clears the derived fields instead of computing garbage.
pub fn parse_brut(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(brut) if brut.is_finite() && brut >= 0.0 => Some(brut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_brut_yields_all_zeros() {
        let d = compute_deductions(0.0);
        assert_eq!(d.impot_revenu, 0.0);
        assert_eq!(d.cotisation_sociale, 0.0);
        assert_eq!(d.total_deductions, 0.0);
        assert_eq!(d.net_a_payer, 0.0);
    }

    #[test]
    fn deterministic_for_same_input() {
        let a = compute_deductions(123_456.78);
        let b = compute_deductions(123_456.78);
        assert_eq!(a, b);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // exactly at the threshold: lower rate
        let at = compute_deductions(250_000.0);
        assert_eq!(at.cotisation_sociale, 250_000.0 * TAUX_COTISATION_BAS);

        // just above: higher rate
        let above = compute_deductions(250_000.01);
        assert_eq!(above.cotisation_sociale, 250_000.01 * TAUX_COTISATION_HAUT);
    }

    #[test]
    fn net_plus_deductions_conserves_brut() {
        for brut in [0.0, 1.0, 99_999.99, 250_000.0, 250_000.01, 1_000_000.0] {
            let d = compute_deductions(brut);
            assert!((d.net_a_payer + d.total_deductions - brut).abs() < 1e-6);
            assert!(d.net_a_payer <= brut);
        }
    }

    #[test]
    fn below_threshold_uses_low_rate() {
        let d = compute_deductions(100_000.0);
        assert_eq!(d.impot_revenu, 18_000.0);
        assert_eq!(d.cotisation_sociale, 2_000.0);
        assert_eq!(d.total_deductions, 20_000.0);
        assert_eq!(d.net_a_payer, 80_000.0);
    }

    #[test]
    fn parse_brut_guards_bad_input() {
        assert_eq!(parse_brut("150000"), Some(150_000.0));
        assert_eq!(parse_brut("  150000.50 "), Some(150_000.50));
        assert_eq!(parse_brut("0"), Some(0.0));
        assert_eq!(parse_brut(""), None);
        assert_eq!(parse_brut("   "), None);
        assert_eq!(parse_brut("-1"), None);
        assert_eq!(parse_brut("abc"), None);
        assert_eq!(parse_brut("NaN"), None);
        assert_eq!(parse_brut("inf"), None);
    }
}
