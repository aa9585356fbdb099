use chrono::Utc;
use tracing::instrument;

use taskhive_auth::issuer::{IssuedCredentials, issue_credentials};
use taskhive_auth::store::{IdentityStore, SessionStore, WorkspaceStore};
use taskhive_config::{JwtConfig, SessionConfig};
use taskhive_core::AppError;
use taskhive_core::rbac::Role;
use taskhive_models::{Identity, ProviderKind, ProviderLink};

use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register(
        identities: &dyn IdentityStore,
        dto: RegisterRequest,
    ) -> Result<Identity, AppError> {
        if identities.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered".to_string()));
        }

        let hashed = hash_password(&dto.password)?;
        let identity = Identity::new(&dto.email, &dto.name, Some(hashed));
        let link = ProviderLink::new(ProviderKind::Local, &identity.email, identity.id);

        identities.insert(&identity, &link).await?;

        Ok(identity)
    }

    /// Verifies a password credential and mints the dual-channel pair.
    ///
    /// Unknown email, wrong password, and deactivated account all fail with
    /// the same message so the response cannot be used to probe for accounts.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        identities: &dyn IdentityStore,
        workspaces: &dyn WorkspaceStore,
        sessions: &dyn SessionStore,
        jwt_config: &JwtConfig,
        session_config: &SessionConfig,
        dto: LoginRequest,
    ) -> Result<(Identity, Option<Role>, IssuedCredentials), AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password".to_string());

        let identity = identities
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(invalid)?;

        let hash = identity.password_hash.as_deref().ok_or_else(invalid)?;
        if !verify_password(&dto.password, hash)? {
            return Err(invalid());
        }
        if !identity.is_active {
            return Err(invalid());
        }

        identities.record_login(identity.id, Utc::now()).await?;

        // Role in the current workspace, carried in the token purely as a
        // display hint. Authorization re-resolves from the membership store.
        let role_hint = match identity.current_workspace {
            Some(workspace_id) => workspaces.role_of(identity.id, workspace_id).await?,
            None => None,
        };

        let credentials =
            issue_credentials(sessions, &identity, role_hint, jwt_config, session_config).await?;

        Ok((identity, role_hint, credentials))
    }

    /// Best-effort server-side revocation. A store fault here is logged and
    /// swallowed: the cookies are cleared regardless, and an orphaned session
    /// row expires on its own.
    pub async fn logout(sessions: &dyn SessionStore, session_token: Option<&str>) {
        if let Some(token) = session_token {
            if let Err(err) = sessions.destroy(token).await {
                tracing::warn!(error = %err, "Session destroy failed during logout");
            }
        }
    }

    /// First-login-registers semantics for external providers.
    ///
    /// The (provider, subject) pair is the stable key; a returning subject
    /// gets their existing account. A new subject whose (verified) provider
    /// email matches an existing account resolves to that account instead of
    /// forking a duplicate. The OAuth handshake itself happens upstream.
    #[instrument(skip_all, fields(provider = provider.as_str()))]
    pub async fn find_or_create_from_provider(
        identities: &dyn IdentityStore,
        provider: ProviderKind,
        subject: &str,
        email: &str,
        name: &str,
    ) -> Result<Identity, AppError> {
        if let Some(identity) = identities.find_by_provider(provider, subject).await? {
            if !identity.is_active {
                return Err(AppError::unauthorized(
                    "Invalid email or password".to_string(),
                ));
            }
            return Ok(identity);
        }

        if let Some(identity) = identities.find_by_email(email).await? {
            if !identity.is_active {
                return Err(AppError::unauthorized(
                    "Invalid email or password".to_string(),
                ));
            }
            // Record the link so future logins key on the stable subject,
            // not on the provider email staying the same.
            let link = ProviderLink::new(provider, subject, identity.id);
            identities.add_link(&link).await?;
            return Ok(identity);
        }

        let identity = Identity::new(email, name, None);
        let link = ProviderLink::new(provider, subject, identity.id);
        identities.insert(&identity, &link).await?;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhive_auth::memory::{MemoryIdentityStore, MemorySessionStore, MemoryWorkspaceStore};
    use taskhive_auth::store::SessionStore;
    use std::sync::Arc;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "taskhive".to_string(),
            audience: "taskhive-clients".to_string(),
            token_ttl_secs: 3600,
        }
    }

    fn test_session_config() -> SessionConfig {
        SessionConfig {
            session_ttl_secs: 3600,
        }
    }

    fn register_dto(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let identities = MemoryIdentityStore::new();

        AuthService::register(&identities, register_dto("ada@example.com"))
            .await
            .unwrap();
        let err = AuthService::register(&identities, register_dto("ADA@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.status().as_u16(), 409);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let identities = Arc::new(MemoryIdentityStore::new());
        let workspaces = MemoryWorkspaceStore::new(identities.clone());
        let sessions = MemorySessionStore::new();

        AuthService::register(identities.as_ref(), register_dto("ada@example.com"))
            .await
            .unwrap();

        let unknown = AuthService::login(
            identities.as_ref(),
            &workspaces,
            &sessions,
            &test_jwt_config(),
            &test_session_config(),
            LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "whatever".to_string(),
            },
        )
        .await
        .unwrap_err();

        let wrong_password = AuthService::login(
            identities.as_ref(),
            &workspaces,
            &sessions,
            &test_jwt_config(),
            &test_session_config(),
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(unknown.to_string(), wrong_password.to_string());
        assert_eq!(unknown.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_login_mints_a_live_session() {
        let identities = Arc::new(MemoryIdentityStore::new());
        let workspaces = MemoryWorkspaceStore::new(identities.clone());
        let sessions = MemorySessionStore::new();

        let registered =
            AuthService::register(identities.as_ref(), register_dto("ada@example.com"))
                .await
                .unwrap();

        let (identity, role_hint, credentials) = AuthService::login(
            identities.as_ref(),
            &workspaces,
            &sessions,
            &test_jwt_config(),
            &test_session_config(),
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "correct horse battery".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(identity.id, registered.id);
        assert_eq!(role_hint, None);
        assert_eq!(
            sessions.lookup(&credentials.session_token).await.unwrap(),
            Some(registered.id)
        );
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let sessions = MemorySessionStore::new();
        let identity_id = uuid::Uuid::new_v4();
        let token = sessions
            .create(identity_id, chrono::Duration::seconds(3600))
            .await
            .unwrap();

        AuthService::logout(&sessions, Some(&token)).await;
        assert_eq!(sessions.lookup(&token).await.unwrap(), None);

        // Replays and missing cookies are both no-ops.
        AuthService::logout(&sessions, Some(&token)).await;
        AuthService::logout(&sessions, None).await;
    }

    #[tokio::test]
    async fn test_provider_login_registers_once() {
        let identities = MemoryIdentityStore::new();

        let first = AuthService::find_or_create_from_provider(
            &identities,
            ProviderKind::Google,
            "google-sub-123",
            "ada@example.com",
            "Ada Lovelace",
        )
        .await
        .unwrap();
        assert!(first.password_hash.is_none());

        let second = AuthService::find_or_create_from_provider(
            &identities,
            ProviderKind::Google,
            "google-sub-123",
            "ada@example.com",
            "Ada Lovelace",
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_provider_login_resolves_existing_email() {
        let identities = MemoryIdentityStore::new();

        let local = AuthService::register(&identities, register_dto("ada@example.com"))
            .await
            .unwrap();

        let via_provider = AuthService::find_or_create_from_provider(
            &identities,
            ProviderKind::Google,
            "google-sub-456",
            "ada@example.com",
            "Ada Lovelace",
        )
        .await
        .unwrap();

        assert_eq!(via_provider.id, local.id);
    }

    #[tokio::test]
    async fn test_merging_into_existing_account_records_the_link() {
        let identities = MemoryIdentityStore::new();

        let local = AuthService::register(&identities, register_dto("ada@example.com"))
            .await
            .unwrap();

        AuthService::find_or_create_from_provider(
            &identities,
            ProviderKind::Google,
            "google-sub-789",
            "ada@example.com",
            "Ada Lovelace",
        )
        .await
        .unwrap();

        // The stable subject now resolves directly, so a later login survives
        // the provider email changing out from under the account.
        let by_subject = identities
            .find_by_provider(ProviderKind::Google, "google-sub-789")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_subject.id, local.id);
    }
}
