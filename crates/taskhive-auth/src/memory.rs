//! In-memory store implementations.
//!
//! Used by the test suites and for running the server without PostgreSQL.
//! Semantics match the SQL implementations: expiry enforced at lookup,
//! composite uniqueness on memberships, cascade delete of memberships with
//! their workspace.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use taskhive_core::rbac::Role;
use taskhive_models::{Identity, ProviderKind, ProviderLink, Workspace, WorkspaceMember};

use crate::store::{
    IdentityStore, SessionStore, StoreError, WorkspaceStore, generate_session_token,
};

#[derive(Debug, Clone)]
struct SessionRow {
    identity_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// Session store backed by a map. Expired rows are dropped lazily at lookup.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRow>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, identity_id: Uuid, ttl: Duration) -> Result<String, StoreError> {
        let token = generate_session_token();
        let row = SessionRow {
            identity_id,
            expires_at: Utc::now() + ttl,
        };
        self.sessions.write().await.insert(token.clone(), row);
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(row) if row.expires_at > Utc::now() => Ok(Some(row.identity_id)),
            Some(_) => {
                sessions.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn destroy(&self, token: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[derive(Default)]
struct IdentityTables {
    identities: HashMap<Uuid, Identity>,
    by_email: HashMap<String, Uuid>,
    links: Vec<ProviderLink>,
}

/// Identity store backed by maps, with email and provider-subject indexes.
#[derive(Default)]
pub struct MemoryIdentityStore {
    tables: RwLock<IdentityTables>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: flips the active flag on an identity.
    pub async fn set_active(&self, id: Uuid, active: bool) {
        if let Some(identity) = self.tables.write().await.identities.get_mut(&id) {
            identity.is_active = active;
        }
    }

    /// Test helper: removes an identity outright, as if the row vanished.
    pub async fn remove(&self, id: Uuid) {
        let mut tables = self.tables.write().await;
        if let Some(identity) = tables.identities.remove(&id) {
            tables.by_email.remove(&identity.email);
            tables.links.retain(|l| l.identity_id != id);
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        Ok(self.tables.read().await.identities.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let tables = self.tables.read().await;
        let normalized = email.trim().to_ascii_lowercase();
        Ok(tables
            .by_email
            .get(&normalized)
            .and_then(|id| tables.identities.get(id))
            .cloned())
    }

    async fn find_by_provider(
        &self,
        provider: ProviderKind,
        subject: &str,
    ) -> Result<Option<Identity>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .find(|l| l.provider == provider && l.subject == subject)
            .and_then(|l| tables.identities.get(&l.identity_id))
            .cloned())
    }

    async fn insert(&self, identity: &Identity, link: &ProviderLink) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .by_email
            .insert(identity.email.clone(), identity.id);
        tables.identities.insert(identity.id, identity.clone());
        tables.links.push(link.clone());
        Ok(())
    }

    async fn add_link(&self, link: &ProviderLink) -> Result<(), StoreError> {
        self.tables.write().await.links.push(link.clone());
        Ok(())
    }

    async fn set_current_workspace(
        &self,
        id: Uuid,
        workspace: Option<Uuid>,
    ) -> Result<(), StoreError> {
        if let Some(identity) = self.tables.write().await.identities.get_mut(&id) {
            identity.current_workspace = workspace;
            identity.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        if let Some(identity) = self.tables.write().await.identities.get_mut(&id) {
            identity.last_login = Some(at);
        }
        Ok(())
    }
}

#[derive(Default)]
struct WorkspaceTables {
    workspaces: HashMap<Uuid, Workspace>,
    // (workspace, identity) -> (role, joined_at)
    memberships: HashMap<(Uuid, Uuid), (Role, DateTime<Utc>)>,
}

/// Workspace + membership store backed by maps. Member listings need display
/// fields, so this store holds a reference to the identity store.
pub struct MemoryWorkspaceStore {
    tables: RwLock<WorkspaceTables>,
    identities: std::sync::Arc<MemoryIdentityStore>,
}

impl MemoryWorkspaceStore {
    pub fn new(identities: std::sync::Arc<MemoryIdentityStore>) -> Self {
        Self {
            tables: RwLock::new(WorkspaceTables::default()),
            identities,
        }
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn create(&self, workspace: &Workspace) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .workspaces
            .insert(workspace.id, workspace.clone());
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.workspaces.contains_key(&id))
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Workspace>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .workspaces
            .values()
            .find(|w| w.invite_code == code)
            .cloned())
    }

    async fn role_of(
        &self,
        identity_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Role>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .memberships
            .get(&(workspace_id, identity_id))
            .map(|(role, _)| *role))
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let key = (workspace_id, identity_id);
        if tables.memberships.contains_key(&key) {
            return Ok(false);
        }
        tables.memberships.insert(key, (role, Utc::now()));
        Ok(true)
    }

    async fn set_role(
        &self,
        workspace_id: Uuid,
        identity_id: Uuid,
        role: Role,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.memberships.get_mut(&(workspace_id, identity_id)) {
            Some((existing, _)) => {
                *existing = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn members(&self, workspace_id: Uuid) -> Result<Vec<WorkspaceMember>, StoreError> {
        let rows: Vec<(Uuid, Role, DateTime<Utc>)> = {
            let tables = self.tables.read().await;
            tables
                .memberships
                .iter()
                .filter(|((ws, _), _)| *ws == workspace_id)
                .map(|((_, identity), (role, joined))| (*identity, *role, *joined))
                .collect()
        };

        let mut members = Vec::with_capacity(rows.len());
        for (identity_id, role, joined_at) in rows {
            if let Some(identity) = self.identities.find_by_id(identity_id).await? {
                members.push(WorkspaceMember {
                    identity_id,
                    email: identity.email,
                    name: identity.name,
                    role,
                    joined_at,
                });
            }
        }
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(members)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.workspaces.remove(&id);
        tables.memberships.retain(|(ws, _), _| *ws != id);
        Ok(())
    }
}
