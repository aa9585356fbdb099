use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use taskhive_core::AppError;
use taskhive_models::Identity;

use crate::middleware::auth::CurrentIdentity;
use crate::state::AppState;
use crate::utils::cookies::{apply_credentials, clear_credentials};
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, MessageResponse, RegisterRequest};
use super::service::AuthService;

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Identity>), AppError> {
    let identity = AuthService::register(state.identities.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(identity)))
}

/// Verifies the password and writes all three credential cookies.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<Identity>), AppError> {
    let (identity, role_hint, credentials) = AuthService::login(
        state.identities.as_ref(),
        state.workspaces.as_ref(),
        state.sessions.as_ref(),
        &state.jwt_config,
        &state.session_config,
        dto,
    )
    .await?;

    let jar = apply_credentials(
        jar,
        &credentials,
        &identity,
        role_hint,
        &state.cookie_config,
        &state.jwt_config,
        &state.session_config,
    );

    Ok((jar, Json(identity)))
}

/// Public: revocation must work for expired and half-broken credential
/// states, so this route sits outside the authentication layer. The cookie
/// clearing always happens; the server-side destroy is best effort.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let session_token = jar
        .get(&state.cookie_config.session_cookie)
        .map(|c| c.value().to_string());

    AuthService::logout(state.sessions.as_ref(), session_token.as_deref()).await;

    let jar = clear_credentials(jar, &state.cookie_config);

    (
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// Echo of the authenticated identity; exercises the full resolver path.
#[instrument(skip_all)]
pub async fn current(identity: CurrentIdentity) -> Json<Identity> {
    Json(identity.0.identity)
}
