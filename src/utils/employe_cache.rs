use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;

use crate::api::client::{ApiClient, ApiError};
use crate::api::employe;
use crate::model::Employe;

/// Roster per entreprise. Rosters change rarely, so a short TTL keeps a burst
/// of dashboard refreshes from refetching the same list on every event.
pub static EMPLOYE_CACHE: Lazy<Cache<u64, Arc<Vec<Employe>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Fetch the roster for an entreprise, through the cache.
pub async fn fetch_employes_cached(
    api: &ApiClient,
    entreprise_id: u64,
) -> Result<Arc<Vec<Employe>>, ApiError> {
    if let Some(hit) = EMPLOYE_CACHE.get(&entreprise_id).await {
        return Ok(hit);
    }

    let employes = Arc::new(employe::list(api, entreprise_id).await?);
    EMPLOYE_CACHE
        .insert(entreprise_id, Arc::clone(&employes))
        .await;
    Ok(employes)
}

pub async fn invalidate(entreprise_id: u64) {
    EMPLOYE_CACHE.invalidate(&entreprise_id).await;
}

/// Drop every cached roster. Called on logout so the next session starts cold.
pub async fn invalidate_all() {
    EMPLOYE_CACHE.invalidate_all();
}

/// Pre-load rosters for a set of entreprises at startup.
pub async fn warmup(api: &ApiClient, entreprise_ids: &[u64]) -> Result<()> {
    let mut total = 0usize;
    for &id in entreprise_ids {
        let employes = fetch_employes_cached(api, id).await?;
        total += employes.len();
    }

    tracing::info!(
        entreprises = entreprise_ids.len(),
        employes = total,
        "employe cache warmup complete"
    );

    Ok(())
}
