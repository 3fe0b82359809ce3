//! Domain entities, aligned with the backend's camelCase JSON.

pub mod employe;
pub mod entreprise;
pub mod paiement;
pub mod payrun;
pub mod payslip;
pub mod pointage;
pub mod role;

pub use employe::{Badge, Employe, StatutEmploye, TypeContrat};
pub use entreprise::Entreprise;
pub use paiement::{ModePaiement, Paiement};
pub use payrun::{PayRun, StatutPayRun, TypePeriode};
pub use payslip::{Payslip, StatutPayslip};
pub use pointage::Pointage;
pub use role::Role;
