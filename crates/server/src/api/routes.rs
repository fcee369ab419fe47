use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, middleware::metrics_middleware, orders, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let dashboard_dir = state.config().server.dashboard_dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Live updates
        .route("/ws", get(ws::ws_handler))
        // Orders
        .route("/orders", get(orders::list_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/start", post(orders::start_order))
        .route("/orders/{id}/pause", post(orders::pause_order))
        .route("/orders/{id}/toggle", post(orders::toggle_order))
        .route("/orders/{id}/complete", post(orders::complete_order))
        // Detail view selection
        .route(
            "/selection",
            get(orders::get_selection)
                .put(orders::set_selection)
                .delete(orders::clear_selection),
        )
        .layer(middleware::from_fn(metrics_middleware))
        .with_state(state);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Serve the dashboard bundle with SPA fallback
    match dashboard_dir {
        Some(dir) => {
            let serve_dir = ServeDir::new(&dir).fallback(ServeFile::new(dir.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router,
    }
}
