//! In-memory session state, the client-side analog of the SPA's stored token.
//!
//! Not a security boundary: the token's claims are decoded without signature
//! verification and drive display decisions only. The API re-checks
//! authorization on every request.

use std::sync::RwLock;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::bus::{DomainEvent, EventBus};
use crate::model::Role;
use crate::utils::employe_cache;

pub static SESSION: Lazy<SessionStore> = Lazy::new(SessionStore::new);

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("le token reçu est invalide: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub entreprise_id: Option<u64>,
    #[serde(default)]
    pub exp: Option<usize>,
}

/// Decode the claims payload for display. Signature and expiry are NOT
/// verified here; the server rejects stale or forged tokens itself.
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub role: Role,
    pub entreprise_id: Option<u64>,
    pub doit_changer_mot_de_passe: bool,
}

struct SessionState {
    token: String,
    user: User,
}

pub struct SessionStore {
    inner: RwLock<Option<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    pub fn set_auth(&self, token: String, user: User) {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(SessionState { token, user });
    }

    pub fn token(&self) -> Option<String> {
        match self.inner.read() {
            Ok(g) => g.as_ref().map(|s| s.token.clone()),
            Err(poisoned) => poisoned.into_inner().as_ref().map(|s| s.token.clone()),
        }
    }

    pub fn user(&self) -> Option<User> {
        match self.inner.read() {
            Ok(g) => g.as_ref().map(|s| s.user.clone()),
            Err(poisoned) => poisoned.into_inner().as_ref().map(|s| s.user.clone()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn clear(&self) {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Close the session: drop the token, flush cached rosters and broadcast the
/// logout event so every dashboard feed resets. Switching users must never
/// show the previous session's figures.
pub async fn logout(api: &ApiClient, session: &SessionStore, bus: &EventBus) {
    session.clear();
    api.set_token(None);
    employe_cache::invalidate_all().await;
    bus.emit(&DomainEvent::Logout);
    tracing::info!("session fermée");
}
