//! Collaborator contracts consumed by the auth core.
//!
//! The stores are external services (PostgreSQL in production, in-memory in
//! tests) with their own consistency guarantees. The core performs each
//! lookup at most once per request and never retries; a store fault is
//! surfaced as [`StoreError`] and mapped to a 503 at the boundary.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use uuid::Uuid;

use taskhive_core::AppError;
use taskhive_core::rbac::Role;
use taskhive_models::{Identity, ProviderKind, ProviderLink, Workspace, WorkspaceMember};

/// Infrastructure fault in a backing store. Not a domain error: the entity
/// may well exist, we just could not ask.
#[derive(Debug)]
pub struct StoreError(pub anyhow::Error);

impl StoreError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self(err.into())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store unavailable: {}", self.0)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err.0, "Backing store unavailable");
        AppError::unavailable("Service temporarily unavailable")
    }
}

/// Server-side opaque session channel.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a fresh session and returns its opaque token.
    async fn create(&self, identity_id: Uuid, ttl: Duration) -> Result<String, StoreError>;

    /// Resolves a token to an identity id; None for unknown or expired tokens.
    async fn lookup(&self, token: &str) -> Result<Option<Uuid>, StoreError>;

    /// Destroys a session. Destroying an absent session is not an error.
    async fn destroy(&self, token: &str) -> Result<(), StoreError>;
}

/// Durable identity records and their provider links.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;

    /// Lookup by case-normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_provider(
        &self,
        provider: ProviderKind,
        subject: &str,
    ) -> Result<Option<Identity>, StoreError>;

    /// Inserts an identity together with its first provider link.
    async fn insert(&self, identity: &Identity, link: &ProviderLink) -> Result<(), StoreError>;

    /// Attaches a further provider link to an existing identity.
    async fn add_link(&self, link: &ProviderLink) -> Result<(), StoreError>;

    async fn set_current_workspace(
        &self,
        id: Uuid,
        workspace: Option<Uuid>,
    ) -> Result<(), StoreError>;

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Workspaces and the (identity, workspace, role) membership relation.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    async fn create(&self, workspace: &Workspace) -> Result<(), StoreError>;

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Workspace>, StoreError>;

    /// The role held by an identity in a workspace; None when not a member.
    async fn role_of(
        &self,
        identity_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Role>, StoreError>;

    /// Adds a membership. Returns false when the identity is already a member
    /// (composite uniqueness), leaving the existing role untouched.
    async fn add_member(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError>;

    /// Changes an existing member's role. Returns false when there is no
    /// membership to change.
    async fn set_role(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError>;

    async fn members(&self, workspace_id: Uuid) -> Result<Vec<WorkspaceMember>, StoreError>;

    /// Deletes the workspace and all of its memberships.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Generates an opaque session token. 48 alphanumeric characters gives well
/// over 256 bits, far beyond practical guessability.
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_tokens_are_long_and_distinct() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), 48);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
