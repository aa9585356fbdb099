use dotenvy::dotenv;

use taskhive::logging::init_tracing;
use taskhive::router::init_router;
use taskhive::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));

    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await.expect("Server crashed");
}
