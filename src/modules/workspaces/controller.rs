use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use taskhive_core::AppError;
use taskhive_models::{Workspace, WorkspaceMember};

use crate::middleware::auth::CurrentIdentity;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{ChangeRoleRequest, CreateWorkspaceRequest, MessageResponse};
use super::service::WorkspaceService;

#[instrument(skip_all)]
pub async fn create_workspace(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    ValidatedJson(dto): ValidatedJson<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<Workspace>), AppError> {
    let workspace = WorkspaceService::create(
        state.workspaces.as_ref(),
        state.identities.as_ref(),
        identity.id(),
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

#[instrument(skip_all)]
pub async fn join_workspace(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path(invite_code): Path<String>,
) -> Result<Json<Workspace>, AppError> {
    let workspace = WorkspaceService::join(
        state.workspaces.as_ref(),
        state.identities.as_ref(),
        identity.id(),
        &invite_code,
    )
    .await?;
    Ok(Json(workspace))
}

#[instrument(skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<Vec<WorkspaceMember>>, AppError> {
    let members =
        WorkspaceService::members(state.workspaces.as_ref(), identity.id(), workspace_id).await?;
    Ok(Json(members))
}

#[instrument(skip_all)]
pub async fn change_member_role(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path((workspace_id, member_id)): Path<(Uuid, Uuid)>,
    Json(dto): Json<ChangeRoleRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    WorkspaceService::change_role(
        state.workspaces.as_ref(),
        identity.id(),
        workspace_id,
        member_id,
        dto.role,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Role updated".to_string(),
    }))
}

#[instrument(skip_all)]
pub async fn delete_workspace(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    WorkspaceService::delete(
        state.workspaces.as_ref(),
        state.identities.as_ref(),
        identity.id(),
        identity.0.identity.current_workspace,
        workspace_id,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Workspace deleted".to_string(),
    }))
}
