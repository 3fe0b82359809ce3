use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};
use crate::model::Role;
use crate::session::{self, AuthError, SessionStore, User};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    mot_de_passe: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginUser {
    #[serde(default)]
    entreprise_id: Option<u64>,
    #[serde(default)]
    #[allow(dead_code)]
    roles: Vec<Role>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    doit_changer_mot_de_passe: bool,
    #[serde(default)]
    user: Option<LoginUser>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("l'email et le mot de passe sont requis")]
    ChampsManquants,
    #[error("le serveur n'a pas renvoyé de token")]
    TokenAbsent,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Token(#[from] AuthError),
}

/// Authenticate and open a session.
///
/// On success the token is stored on the client and the decoded claims become
/// the session user. The claims are display-only; authorization is enforced
/// by the API on every call.
pub async fn login(
    api: &ApiClient,
    session: &SessionStore,
    email: &str,
    mot_de_passe: &str,
) -> Result<User, LoginError> {
    if email.is_empty() || mot_de_passe.is_empty() {
        return Err(LoginError::ChampsManquants);
    }

    let response: LoginResponse = api
        .post_json(
            "/auth/login",
            &LoginRequest {
                email,
                mot_de_passe,
            },
        )
        .await?;

    let token = response.token.ok_or(LoginError::TokenAbsent)?;
    let claims = session::decode_claims(&token)?;

    let user = User {
        id: claims.user_id,
        email: claims.email,
        role: claims.role,
        // the claims may omit it; the login body carries it for multi-role users
        entreprise_id: claims
            .entreprise_id
            .or_else(|| response.user.as_ref().and_then(|u| u.entreprise_id)),
        doit_changer_mot_de_passe: response.doit_changer_mot_de_passe,
    };

    session.set_auth(token.clone(), user.clone());
    api.set_token(Some(token));
    tracing::info!(user_id = user.id, role = %user.role, "session ouverte");

    Ok(user)
}
