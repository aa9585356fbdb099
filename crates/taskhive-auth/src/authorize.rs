//! Role resolution and the authorization composition.
//!
//! `resolve_role` distinguishes "workspace absent" from "not a member"
//! internally (for logging and for callers that genuinely need the
//! difference), but the [`AppError`] conversion collapses both into one
//! identical `Unauthorized` response. An external caller probing workspace
//! ids must not be able to tell whether a workspace exists from the error it
//! gets back. Callers must preserve this property: never map
//! [`AuthzError::WorkspaceNotFound`] to a 404 on a guarded route.

use uuid::Uuid;

use taskhive_core::AppError;
use taskhive_core::rbac::{Permission, Role, require_permissions};

use crate::store::{StoreError, WorkspaceStore};

#[derive(Debug)]
pub enum AuthzError {
    /// The workspace id references nothing.
    WorkspaceNotFound,
    /// The workspace exists but the identity holds no membership in it.
    NotAMember,
    Unavailable(StoreError),
}

impl From<StoreError> for AuthzError {
    fn from(err: StoreError) -> Self {
        AuthzError::Unavailable(err)
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            // Same status, same body for both: enumeration resistance.
            AuthzError::WorkspaceNotFound | AuthzError::NotAMember => {
                AppError::unauthorized("You are not a member of this workspace")
            }
            AuthzError::Unavailable(store_err) => store_err.into(),
        }
    }
}

/// Determines the identity's effective role in a workspace from its
/// membership. Read-only.
pub async fn resolve_role(
    workspaces: &dyn WorkspaceStore,
    identity_id: Uuid,
    workspace_id: Uuid,
) -> Result<Role, AuthzError> {
    if !workspaces.exists(workspace_id).await? {
        return Err(AuthzError::WorkspaceNotFound);
    }

    workspaces
        .role_of(identity_id, workspace_id)
        .await?
        .ok_or(AuthzError::NotAMember)
}

/// Role Resolver + Permission Guard in one call: resolves the identity's role
/// and checks it grants every required permission. Returns the role so
/// handlers can branch on it without a second lookup.
pub async fn authorize(
    workspaces: &dyn WorkspaceStore,
    identity_id: Uuid,
    workspace_id: Uuid,
    required: &[Permission],
) -> Result<Role, AppError> {
    let role = resolve_role(workspaces, identity_id, workspace_id)
        .await
        .map_err(AppError::from)?;

    require_permissions(role, required)?;
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryIdentityStore, MemoryWorkspaceStore};
    use crate::store::WorkspaceStore;
    use std::sync::Arc;
    use taskhive_models::Workspace;

    fn memory_store() -> MemoryWorkspaceStore {
        MemoryWorkspaceStore::new(Arc::new(MemoryIdentityStore::new()))
    }

    async fn seed_workspace(store: &MemoryWorkspaceStore, owner: Uuid) -> Workspace {
        let ws = Workspace::new("Acme", None, owner);
        store.create(&ws).await.unwrap();
        store.add_member(ws.id, owner, Role::Owner).await.unwrap();
        ws
    }

    #[tokio::test]
    async fn test_resolve_role_returns_membership_role() {
        let store = memory_store();
        let owner = Uuid::new_v4();
        let ws = seed_workspace(&store, owner).await;

        let role = resolve_role(&store, owner, ws.id).await.unwrap();
        assert_eq!(role, Role::Owner);
    }

    #[tokio::test]
    async fn test_no_membership_is_not_a_member_never_not_found() {
        let store = memory_store();
        let ws = seed_workspace(&store, Uuid::new_v4()).await;
        let outsider = Uuid::new_v4();

        let err = resolve_role(&store, outsider, ws.id).await.unwrap_err();
        assert!(matches!(err, AuthzError::NotAMember));
    }

    #[tokio::test]
    async fn test_missing_workspace_is_workspace_not_found() {
        let store = memory_store();
        let err = resolve_role(&store, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::WorkspaceNotFound));
    }

    #[test]
    fn test_both_failure_kinds_collapse_identically() {
        let not_found: AppError = AuthzError::WorkspaceNotFound.into();
        let not_member: AppError = AuthzError::NotAMember.into();

        assert_eq!(not_found.status().as_u16(), 401);
        assert_eq!(not_member.status().as_u16(), 401);
        assert_eq!(not_found.to_string(), not_member.to_string());
    }

    #[tokio::test]
    async fn test_owner_may_delete_workspace() {
        let store = memory_store();
        let owner = Uuid::new_v4();
        let ws = seed_workspace(&store, owner).await;

        let role = authorize(&store, owner, ws.id, &[Permission::DeleteWorkspace])
            .await
            .unwrap();
        assert_eq!(role, Role::Owner);
    }

    #[tokio::test]
    async fn test_member_may_not_delete_workspace() {
        let store = memory_store();
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let ws = seed_workspace(&store, owner).await;
        store.add_member(ws.id, member, Role::Member).await.unwrap();

        let err = authorize(&store, member, ws.id, &[Permission::DeleteWorkspace])
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_member_may_view() {
        let store = memory_store();
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let ws = seed_workspace(&store, owner).await;
        store.add_member(ws.id, member, Role::Member).await.unwrap();

        assert!(
            authorize(&store, member, ws.id, &[Permission::ViewOnly])
                .await
                .is_ok()
        );
    }
}
