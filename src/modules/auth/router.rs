use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{current, login, logout, register};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route(
            "/current",
            get(current).route_layer(middleware::from_fn_with_state(state, authenticate)),
        )
}
