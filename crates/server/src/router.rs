use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/api/ai/generateCampaign",
            post(handlers::generate_campaign_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
