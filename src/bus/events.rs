//! Topic constants and event payloads.
//!
//! One payload shape per topic: consumers match on the enum instead of
//! shape-guessing a dynamic payload.

use serde::{Deserialize, Serialize};

pub const TOPIC_PAIEMENT_CREATED: &str = "paiement:created";
pub const TOPIC_LOGOUT: &str = "auth:logout";

/// Published after the API confirmed a payment. Never emitted on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaiementCreated {
    pub montant: f64,
    pub payslip_id: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    PaiementCreated(PaiementCreated),
    /// Session cleared; all dashboard-derived state must reset.
    Logout,
}

impl DomainEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            DomainEvent::PaiementCreated(_) => TOPIC_PAIEMENT_CREATED,
            DomainEvent::Logout => TOPIC_LOGOUT,
        }
    }
}
