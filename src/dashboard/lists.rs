//! Recent payslips, recent payments and upcoming payments for the dashboard.
//!
//! No optimistic patching here: lists are cheap to re-fetch whole, so the
//! feed goes straight to the authoritative source on every payment event.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;

use crate::api::client::{ApiClient, ApiError};
use crate::api::{paiement, payslip};
use crate::bus::{EventBus, Subscription, TOPIC_LOGOUT, TOPIC_PAIEMENT_CREATED};
use crate::model::{Employe, Paiement, Payslip};
use crate::utils::employe_cache;

const LIMITE_RECENTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PayslipAvecEmploye {
    pub payslip: Payslip,
    pub employe: Option<Employe>,
}

#[derive(Debug, Clone)]
pub struct PaiementAvecEmploye {
    pub paiement: Paiement,
    pub employe: Option<Employe>,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardLists {
    pub recent_payslips: Vec<PayslipAvecEmploye>,
    pub recent_payments: Vec<PaiementAvecEmploye>,
    /// Payslips still EN_ATTENTE, oldest debts first in display order.
    pub upcoming_payments: Vec<PayslipAvecEmploye>,
    pub error: Option<String>,
}

struct Shared {
    state: Mutex<DashboardLists>,
    generation: AtomicU64,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, DashboardLists> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub struct ListsFeed {
    api: Arc<ApiClient>,
    entreprise_id: u64,
    shared: Arc<Shared>,
    _subs: Vec<Subscription>,
}

impl ListsFeed {
    pub fn attach(api: Arc<ApiClient>, bus: &EventBus, entreprise_id: u64) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(DashboardLists::default()),
            generation: AtomicU64::new(0),
        });

        let paiement_sub = {
            let api = Arc::clone(&api);
            let shared = Arc::clone(&shared);
            bus.subscribe(TOPIC_PAIEMENT_CREATED, move |_| {
                spawn_refetch(Arc::clone(&api), Arc::clone(&shared), entreprise_id);
            })
        };

        let logout_sub = {
            let shared = Arc::clone(&shared);
            bus.subscribe(TOPIC_LOGOUT, move |_| {
                shared.generation.fetch_add(1, Ordering::SeqCst);
                *shared.lock_state() = DashboardLists::default();
            })
        };

        Self {
            api,
            entreprise_id,
            shared,
            _subs: vec![paiement_sub, logout_sub],
        }
    }

    pub async fn refresh(&self) -> Result<(), ApiError> {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        refetch(&self.api, &self.shared, self.entreprise_id, generation).await
    }

    pub fn snapshot(&self) -> DashboardLists {
        self.shared.lock_state().clone()
    }
}

fn spawn_refetch(api: Arc<ApiClient>, shared: Arc<Shared>, entreprise_id: u64) {
    let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let _ = refetch(&api, &shared, entreprise_id, generation).await;
            });
        }
        Err(_) => tracing::debug!("no async runtime, lists stay as-is until next refresh"),
    }
}

async fn refetch(
    api: &ApiClient,
    shared: &Shared,
    entreprise_id: u64,
    generation: u64,
) -> Result<(), ApiError> {
    let result = fetch_lists(api, entreprise_id).await;

    if shared.generation.load(Ordering::SeqCst) != generation {
        return Ok(()); // superseded
    }

    let mut state = shared.lock_state();
    match result {
        Ok(lists) => {
            *state = lists;
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, entreprise_id, "échec du chargement des listes");
            state.error = Some(err.to_string());
            Err(err)
        }
    }
}

async fn fetch_lists(api: &ApiClient, entreprise_id: u64) -> Result<DashboardLists, ApiError> {
    let employes = employe_cache::fetch_employes_cached(api, entreprise_id).await?;

    // one fetch per employé, in parallel
    let fetches = employes.iter().map(|e| payslip::list_for_employe(api, e.id));
    let mut payslips: Vec<Payslip> = join_all(fetches)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
    payslips.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let avec_employe: Vec<PayslipAvecEmploye> = payslips
        .iter()
        .map(|p| PayslipAvecEmploye {
            payslip: p.clone(),
            employe: employes.iter().find(|e| e.id == p.employe_id).cloned(),
        })
        .collect();

    let fetches = payslips.iter().map(|p| paiement::list_for_payslip(api, p.id));
    let mut paiements: Vec<Paiement> = join_all(fetches)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
    paiements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let recent_payments = paiements
        .into_iter()
        .take(LIMITE_RECENTS)
        .map(|paiement| {
            let employe = payslips
                .iter()
                .find(|p| p.id == paiement.payslip_id)
                .and_then(|p| employes.iter().find(|e| e.id == p.employe_id).cloned());
            PaiementAvecEmploye { paiement, employe }
        })
        .collect();

    let upcoming_payments = avec_employe
        .iter()
        .filter(|p| p.payslip.est_en_attente())
        .take(LIMITE_RECENTS)
        .cloned()
        .collect();

    Ok(DashboardLists {
        recent_payslips: avec_employe.into_iter().take(LIMITE_RECENTS).collect(),
        recent_payments,
        upcoming_payments,
        error: None,
    })
}
