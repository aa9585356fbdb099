//! Dual-channel credential issuance.

use taskhive_config::{JwtConfig, SessionConfig};
use taskhive_core::AppError;
use taskhive_core::rbac::Role;
use taskhive_models::Identity;

use crate::jwt::create_access_token;
use crate::store::SessionStore;

/// The pair of artifacts minted on login: an opaque server-side session token
/// and a signed self-contained token. The transport layer turns these into
/// cookies (plus the derived client-readable display artifact).
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    pub session_token: String,
    pub access_token: String,
}

/// Mints a fresh session and a fresh signed token for an identity.
///
/// Always produces a new pair; prior credentials for the same identity are
/// untouched (sessions are per-login-event). The two TTLs are independent
/// configuration.
pub async fn issue_credentials(
    sessions: &dyn SessionStore,
    identity: &Identity,
    role_hint: Option<Role>,
    jwt_config: &JwtConfig,
    session_config: &SessionConfig,
) -> Result<IssuedCredentials, AppError> {
    let session_token = sessions
        .create(
            identity.id,
            chrono::Duration::seconds(session_config.session_ttl_secs),
        )
        .await?;

    let access_token = create_access_token(identity.id, &identity.email, role_hint, jwt_config)?;

    Ok(IssuedCredentials {
        session_token,
        access_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::verify_token;
    use crate::memory::MemorySessionStore;
    use crate::store::SessionStore;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "taskhive".to_string(),
            audience: "taskhive-clients".to_string(),
            token_ttl_secs: 3600,
        }
    }

    #[tokio::test]
    async fn test_both_artifacts_reference_the_same_identity() {
        let sessions = MemorySessionStore::new();
        let identity = Identity::new("ada@example.com", "Ada", None);
        let jwt_config = test_jwt_config();
        let session_config = SessionConfig {
            session_ttl_secs: 3600,
        };

        let creds = issue_credentials(
            &sessions,
            &identity,
            Some(Role::Owner),
            &jwt_config,
            &session_config,
        )
        .await
        .unwrap();

        assert_eq!(
            sessions.lookup(&creds.session_token).await.unwrap(),
            Some(identity.id)
        );
        let claims = verify_token(&creds.access_token, &jwt_config).unwrap();
        assert_eq!(claims.sub, identity.id.to_string());
        assert_eq!(claims.role, Some(Role::Owner));
    }

    #[tokio::test]
    async fn test_each_call_mints_a_fresh_pair() {
        let sessions = MemorySessionStore::new();
        let identity = Identity::new("ada@example.com", "Ada", None);
        let jwt_config = test_jwt_config();
        let session_config = SessionConfig {
            session_ttl_secs: 3600,
        };

        let first = issue_credentials(&sessions, &identity, None, &jwt_config, &session_config)
            .await
            .unwrap();
        let second = issue_credentials(&sessions, &identity, None, &jwt_config, &session_config)
            .await
            .unwrap();

        assert_ne!(first.session_token, second.session_token);
        // The earlier session stays live; issuance never merges or revokes.
        assert_eq!(
            sessions.lookup(&first.session_token).await.unwrap(),
            Some(identity.id)
        );
    }
}
