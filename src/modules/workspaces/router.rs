use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    change_member_role, create_workspace, delete_workspace, join_workspace, list_members,
};

pub fn init_workspaces_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_workspace))
        .route("/join/{invite_code}", post(join_workspace))
        .route("/{workspace_id}", delete(delete_workspace))
        .route("/{workspace_id}/members", get(list_members))
        .route(
            "/{workspace_id}/members/{member_id}/role",
            put(change_member_role),
        )
}
