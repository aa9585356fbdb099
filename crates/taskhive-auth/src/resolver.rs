//! The hybrid authentication resolver.
//!
//! State machine per request:
//!
//! ```text
//! Unauthenticated ──session valid──> Authenticated (Session)
//!        │
//!        └──token valid + identity re-fetch ok──> Authenticated (Token)
//!        │
//!        └──otherwise──> Rejected
//! ```
//!
//! The session is checked first because it is server-revocable and therefore
//! the most current signal; the token check is skipped entirely when the
//! session resolves. The two store reads happen sequentially (session before
//! token) and at most once each per request.
//!
//! Tokens cannot be revoked before expiry, so a cryptographically valid token
//! is not proof of a live account: the identity is always re-fetched and its
//! active flag re-checked. The same active check runs on the session path;
//! a deactivated identity must not keep authenticating through a session that
//! outlived the deactivation.

use taskhive_config::JwtConfig;
use taskhive_models::Identity;
use uuid::Uuid;

use crate::jwt::verify_token;
use crate::store::{IdentityStore, SessionStore, StoreError};

/// Which credential channel produced the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChannel {
    Session,
    Token,
}

/// An authenticated identity together with the channel that vouched for it.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub identity: Identity,
    pub channel: AuthChannel,
}

/// Why a request was rejected.
#[derive(Debug)]
pub enum AuthFailure {
    /// Neither channel carried a usable credential. Nothing to clear.
    Missing,
    /// A token was presented and failed: bad signature, expired, wrong
    /// issuer/audience, or its identity no longer exists or is inactive.
    /// Callers must proactively clear both credential channels.
    Invalid,
    /// A backing store could not be reached; nothing can be concluded about
    /// the credential.
    Unavailable(StoreError),
}

impl From<StoreError> for AuthFailure {
    fn from(err: StoreError) -> Self {
        AuthFailure::Unavailable(err)
    }
}

/// Resolves an authenticated identity from the request's raw credentials.
///
/// `session_token` is the value of the session cookie, `access_token` the
/// signed token taken from its cookie or the Authorization header; the
/// caller does the transport extraction.
///
/// A session cookie that no longer resolves (destroyed, expired, or its
/// identity gone/deactivated) is not itself grounds for rejection; the
/// resolver falls through to the token channel, which re-validates from
/// scratch.
pub async fn resolve_identity(
    sessions: &dyn SessionStore,
    identities: &dyn IdentityStore,
    jwt_config: &JwtConfig,
    session_token: Option<&str>,
    access_token: Option<&str>,
) -> Result<ResolvedIdentity, AuthFailure> {
    if let Some(token) = session_token {
        if let Some(identity_id) = sessions.lookup(token).await? {
            match identities.find_by_id(identity_id).await? {
                Some(identity) if identity.is_active => {
                    return Ok(ResolvedIdentity {
                        identity,
                        channel: AuthChannel::Session,
                    });
                }
                _ => {
                    // Stale session row; the token fallback decides the rest.
                    tracing::debug!(%identity_id, "Session references a dead identity");
                }
            }
        }
    }

    let Some(raw) = access_token else {
        return Err(AuthFailure::Missing);
    };

    let claims = verify_token(raw, jwt_config).map_err(|_| AuthFailure::Invalid)?;
    let identity_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthFailure::Invalid)?;

    // Mandatory re-fetch: the token alone proves possession, not that the
    // account still exists or is still active.
    let identity = identities
        .find_by_id(identity_id)
        .await?
        .ok_or(AuthFailure::Invalid)?;

    if !identity.is_active {
        return Err(AuthFailure::Invalid);
    }

    Ok(ResolvedIdentity {
        identity,
        channel: AuthChannel::Token,
    })
}
