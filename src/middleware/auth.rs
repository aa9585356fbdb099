use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use taskhive_auth::resolver::{AuthFailure, ResolvedIdentity, resolve_identity};
use taskhive_core::AppError;

use crate::state::AppState;
use crate::utils::cookies::clear_credentials;

/// The identity resolved for this request, available to any handler behind
/// the [`authenticate`] layer.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub ResolvedIdentity);

impl CurrentIdentity {
    pub fn id(&self) -> uuid::Uuid {
        self.0.identity.id
    }

    pub fn email(&self) -> &str {
        &self.0.identity.email
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Authentication gate for protected routes.
///
/// Credentials are read from the session cookie and from the token cookie,
/// with an `Authorization: Bearer` header accepted in place of the token
/// cookie for non-browser clients. On success the resolved identity is
/// attached to the request; on an invalid token the 401 response also clears
/// every credential cookie so the client stops replaying a dead credential.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let session_token = jar
        .get(&state.cookie_config.session_cookie)
        .map(|c| c.value().to_string());
    let access_token = jar
        .get(&state.cookie_config.token_cookie)
        .map(|c| c.value().to_string())
        .or_else(|| bearer_token(req.headers()).map(str::to_string));

    match resolve_identity(
        state.sessions.as_ref(),
        state.identities.as_ref(),
        &state.jwt_config,
        session_token.as_deref(),
        access_token.as_deref(),
    )
    .await
    {
        Ok(resolved) => {
            req.extensions_mut().insert(CurrentIdentity(resolved));
            next.run(req).await
        }
        Err(AuthFailure::Missing) => {
            AppError::unauthorized("Authentication required".to_string()).into_response()
        }
        Err(AuthFailure::Invalid) => {
            let clearing = clear_credentials(CookieJar::new(), &state.cookie_config);
            (
                clearing,
                AppError::unauthorized("Invalid or expired credentials".to_string()),
            )
                .into_response()
        }
        Err(AuthFailure::Unavailable(err)) => AppError::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_non_bearer_authorization_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
