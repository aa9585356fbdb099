//! Signing and verification of the stateless credential.
//!
//! Verification is bound to the deployment's fixed issuer/audience pair; a
//! token minted by another deployment fails even with the same secret. Every
//! failure reason (bad signature, expiry, wrong issuer or audience) collapses
//! into one opaque `Unauthorized` so callers cannot use the error as an
//! oracle for why a token was rejected.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use taskhive_config::JwtConfig;
use taskhive_core::AppError;
use taskhive_core::rbac::Role;

use crate::claims::Claims;

/// Mints a signed stateless token for an identity.
///
/// The role hint is the identity's role in its current workspace at issuance
/// time (None when the identity has no memberships yet). TTL comes from
/// configuration, never a literal at the call site.
pub fn create_access_token(
    identity_id: Uuid,
    email: &str,
    role_hint: Option<Role>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.token_ttl_secs;

    let claims = Claims {
        sub: identity_id.to_string(),
        email: email.to_string(),
        role: role_hint,
        iss: jwt_config.issuer.clone(),
        aud: jwt_config.audience.clone(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Verifies signature, expiry, issuer, and audience, returning the claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&jwt_config.issuer]);
    validation.set_audience(&[&jwt_config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired credentials"))
}
