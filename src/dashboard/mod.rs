//! Dashboard data feeds.
//!
//! Each feed owns its state, subscribes to the event bus while alive and
//! re-fetches authoritative data from the API when a payment lands. Feeds
//! never talk to the payment flow directly; the bus is the only coupling.

pub mod evolution;
pub mod lists;
pub mod stats;

pub use evolution::{PayrollChartPoint, grouper_par_mois};
pub use lists::{DashboardLists, ListsFeed};
pub use stats::{StatsFeed, StatsSnapshot, SyncPhase};
