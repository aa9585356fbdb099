use tracing::instrument;
use uuid::Uuid;

use taskhive_auth::authorize::authorize;
use taskhive_auth::store::{IdentityStore, WorkspaceStore};
use taskhive_core::AppError;
use taskhive_core::rbac::{Permission, Role};
use taskhive_models::{Workspace, WorkspaceMember};

use super::model::CreateWorkspaceRequest;

pub struct WorkspaceService;

impl WorkspaceService {
    /// Creates a workspace, makes the creator its OWNER member, and points
    /// their current workspace at it.
    #[instrument(skip_all, fields(creator = %creator_id))]
    pub async fn create(
        workspaces: &dyn WorkspaceStore,
        identities: &dyn IdentityStore,
        creator_id: Uuid,
        dto: CreateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        let workspace = Workspace::new(&dto.name, dto.description.as_deref(), creator_id);

        workspaces.create(&workspace).await?;
        workspaces
            .add_member(workspace.id, creator_id, Role::Owner)
            .await?;
        identities
            .set_current_workspace(creator_id, Some(workspace.id))
            .await?;

        Ok(workspace)
    }

    /// Joins by invite code as a MEMBER. The code is a capability, so an
    /// unknown code is a plain 404 rather than an enumeration concern.
    #[instrument(skip_all, fields(identity = %identity_id))]
    pub async fn join(
        workspaces: &dyn WorkspaceStore,
        identities: &dyn IdentityStore,
        identity_id: Uuid,
        invite_code: &str,
    ) -> Result<Workspace, AppError> {
        let workspace = workspaces
            .find_by_invite_code(invite_code)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid invite code".to_string()))?;

        let added = workspaces
            .add_member(workspace.id, identity_id, Role::Member)
            .await?;
        if !added {
            return Err(AppError::conflict(
                "Already a member of this workspace".to_string(),
            ));
        }

        identities
            .set_current_workspace(identity_id, Some(workspace.id))
            .await?;

        Ok(workspace)
    }

    #[instrument(skip_all, fields(workspace = %workspace_id))]
    pub async fn members(
        workspaces: &dyn WorkspaceStore,
        caller_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Vec<WorkspaceMember>, AppError> {
        authorize(
            workspaces,
            caller_id,
            workspace_id,
            &[Permission::ViewOnly],
        )
        .await?;

        Ok(workspaces.members(workspace_id).await?)
    }

    /// Changes a member's role. The caller has already proven membership by
    /// passing the guard, so "no such member" is safe to report as 404 here.
    #[instrument(skip_all, fields(workspace = %workspace_id, member = %member_id))]
    pub async fn change_role(
        workspaces: &dyn WorkspaceStore,
        caller_id: Uuid,
        workspace_id: Uuid,
        member_id: Uuid,
        role: Role,
    ) -> Result<(), AppError> {
        authorize(
            workspaces,
            caller_id,
            workspace_id,
            &[Permission::ChangeMemberRole],
        )
        .await?;

        let changed = workspaces.set_role(workspace_id, member_id, role).await?;
        if !changed {
            return Err(AppError::not_found(
                "No such member in this workspace".to_string(),
            ));
        }

        Ok(())
    }

    #[instrument(skip_all, fields(workspace = %workspace_id))]
    pub async fn delete(
        workspaces: &dyn WorkspaceStore,
        identities: &dyn IdentityStore,
        caller_id: Uuid,
        caller_current_workspace: Option<Uuid>,
        workspace_id: Uuid,
    ) -> Result<(), AppError> {
        authorize(
            workspaces,
            caller_id,
            workspace_id,
            &[Permission::DeleteWorkspace],
        )
        .await?;

        workspaces.delete(workspace_id).await?;

        if caller_current_workspace == Some(workspace_id) {
            identities
                .set_current_workspace(caller_id, None)
                .await?;
        }

        Ok(())
    }
}
