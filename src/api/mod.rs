//! REST API client layer.
//!
//! Thin typed wrappers over the payroll API's endpoints. Business rules and
//! persistence live server-side; these services only shape requests and
//! surface `{ "message": ... }` error bodies.

pub mod auth;
pub mod client;
pub mod employe;
pub mod entreprise;
pub mod paiement;
pub mod payrun;
pub mod payslip;

pub use client::{ApiClient, ApiError};
