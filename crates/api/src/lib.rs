pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum application router.
///
/// The service is stateless: every trend request constructs its own
/// detectors, so the router carries no shared state.
pub fn build_router() -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the API server.
pub async fn start_server(bind_addr: &str) -> anyhow::Result<()> {
    let app = build_router();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("API server listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
