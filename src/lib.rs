//! Client-side core for a payroll/HR administration frontend.
//!
//! All business logic and persistence live in the REST API; this crate owns
//! the client's share of the work: the deduction barème applied to payslip
//! forms, the in-process event bus that keeps independent dashboard views in
//! sync after a payment, the typed API services, and the session state.
//!
//! Startup wiring: call [`logging::init`] once, build a [`config::Config`]
//! from the environment and an [`api::ApiClient`] from it; the shared bus
//! ([`bus::BUS`]) and session ([`session::SESSION`]) are process-wide.

pub mod api;
pub mod bus;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod payroll;
pub mod session;
pub mod utils;

pub use bus::{DomainEvent, EventBus, PaiementCreated, Subscription};
pub use payroll::{Deductions, compute_deductions, parse_brut};
