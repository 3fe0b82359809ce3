//! Current-month dashboard statistics feed.
//!
//! Reacts to `paiement:created` with an optimistic local patch for a snappy
//! display, then reconciles against the server's aggregates. The server is
//! the source of truth; the optimistic figures are only a latency-hiding
//! approximation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::client::{ApiClient, ApiError};
use crate::api::paiement::{self, StatsMoisCourant};
use crate::bus::{DomainEvent, EventBus, Subscription, TOPIC_LOGOUT, TOPIC_PAIEMENT_CREATED};

/// Where the displayed figures sit relative to server truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Figures match the last authoritative fetch.
    Settled,
    /// An optimistic patch was applied and has not been confirmed yet.
    StaleOptimistic,
    /// An authoritative re-fetch is in flight.
    Reconciling,
}

#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub stats: StatsMoisCourant,
    pub phase: SyncPhase,
    pub error: Option<String>,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            stats: StatsMoisCourant::default(),
            phase: SyncPhase::Settled,
            error: None,
        }
    }
}

struct Shared {
    state: Mutex<StatsSnapshot>,
    /// Request-generation token: a response only lands if no newer request
    /// (or reset) started after it. Last write wins.
    generation: AtomicU64,
    /// True while an optimistic patch has not been confirmed by the server.
    dirty: AtomicBool,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, StatsSnapshot> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub struct StatsFeed {
    api: Arc<ApiClient>,
    entreprise_id: u64,
    shared: Arc<Shared>,
    _subs: Vec<Subscription>,
}

impl StatsFeed {
    /// Wire the feed to the bus. It stays subscribed until dropped.
    pub fn attach(api: Arc<ApiClient>, bus: &EventBus, entreprise_id: u64) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(StatsSnapshot::default()),
            generation: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
        });

        let paiement_sub = {
            let api = Arc::clone(&api);
            let shared = Arc::clone(&shared);
            bus.subscribe(TOPIC_PAIEMENT_CREATED, move |event| {
                if let DomainEvent::PaiementCreated(paiement) = event {
                    apply_optimistic(&shared, paiement.montant);
                    spawn_reconcile(Arc::clone(&api), Arc::clone(&shared), entreprise_id);
                }
            })
        };

        let logout_sub = {
            let shared = Arc::clone(&shared);
            bus.subscribe(TOPIC_LOGOUT, move |_| reset(&shared))
        };

        Self {
            api,
            entreprise_id,
            shared,
            _subs: vec![paiement_sub, logout_sub],
        }
    }

    /// Authoritative fetch, awaited. Used for the initial load and by tests;
    /// event-triggered reconciles go through the spawned path instead.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.lock_state().phase = SyncPhase::Reconciling;
        reconcile(&self.api, &self.shared, self.entreprise_id, generation).await
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.shared.lock_state().clone()
    }
}

fn apply_optimistic(shared: &Shared, montant: f64) {
    if !montant.is_finite() || montant <= 0.0 {
        return;
    }
    let mut state = shared.lock_state();
    state.stats.montant_paye += montant;
    state.stats.montant_restant = (state.stats.montant_restant - montant).max(0.0);
    state.phase = SyncPhase::StaleOptimistic;
    shared.dirty.store(true, Ordering::SeqCst);
}

/// Zero everything and invalidate in-flight responses, whatever their state.
fn reset(shared: &Shared) {
    shared.generation.fetch_add(1, Ordering::SeqCst);
    shared.dirty.store(false, Ordering::SeqCst);
    *shared.lock_state() = StatsSnapshot::default();
}

fn spawn_reconcile(api: Arc<ApiClient>, shared: Arc<Shared>, entreprise_id: u64) {
    let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
    shared.lock_state().phase = SyncPhase::Reconciling;

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                // failure already recorded in the snapshot
                let _ = reconcile(&api, &shared, entreprise_id, generation).await;
            });
        }
        Err(_) => {
            tracing::debug!("no async runtime, stats stay optimistic until next refresh");
            shared.lock_state().phase = SyncPhase::StaleOptimistic;
        }
    }
}

async fn reconcile(
    api: &ApiClient,
    shared: &Shared,
    entreprise_id: u64,
    generation: u64,
) -> Result<(), ApiError> {
    let result = paiement::stats_mois_courant(api, entreprise_id).await;

    // superseded by a newer request or a reset: drop the response
    if shared.generation.load(Ordering::SeqCst) != generation {
        return Ok(());
    }

    let mut state = shared.lock_state();
    match result {
        Ok(stats) => {
            state.stats = stats;
            state.phase = SyncPhase::Settled;
            state.error = None;
            shared.dirty.store(false, Ordering::SeqCst);
            Ok(())
        }
        Err(err) => {
            // keep the last-known figures visible, only surface the error;
            // figures that were never patched are not "optimistic"
            tracing::error!(error = %err, entreprise_id, "échec du chargement des stats");
            state.error = Some(err.to_string());
            state.phase = if shared.dirty.load(Ordering::SeqCst) {
                SyncPhase::StaleOptimistic
            } else {
                SyncPhase::Settled
            };
            Err(err)
        }
    }
}
