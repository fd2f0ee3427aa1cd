//! REST surface of the booking service.

mod auth;
mod error;
mod handlers;

use crate::admin::AdminDesk;
use crate::catalog::CatalogReader;
use crate::intake::OrderIntake;
use crate::reviews::ReviewDesk;
use crate::store::PrimaryStore;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PrimaryStore>,
    pub catalog: CatalogReader,
    pub intake: OrderIntake,
    pub reviews: ReviewDesk,
    pub admin: AdminDesk,
    pub admin_token: Option<Arc<str>>,
    pub fallback_ephemeral: bool,
}

/// Build the axum router (separated for testing).
pub fn router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/services", get(handlers::list_services))
        .route("/api/orders", post(handlers::submit_order).get(handlers::list_orders))
        .route("/api/reviews", post(handlers::submit_review))
        .route("/api/reviews/:service_id", get(handlers::list_reviews))
        .route("/api/payment/confirm/:order_id", put(handlers::confirm_payment))
        .route("/api/admin/services", post(handlers::create_service))
        .route(
            "/api/admin/services/:id",
            put(handlers::update_service).delete(handlers::delete_service),
        )
        .route(
            "/api/admin/orders/:id",
            put(handlers::update_order_status).delete(handlers::delete_order),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), warn_when_offline))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);
    if origin == "*" {
        return cors.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            warn!(%origin, "Invalid CORS origin, cross-origin requests will be refused");
            cors
        }
    }
}

/// Offline mode does not block requests; it only makes them visible.
async fn warn_when_offline(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.uri().path().starts_with("/api") && !state.store.is_connected() {
        warn!(path = %request.uri().path(), method = %request.method(), "Primary store offline, serving in degraded mode");
    }
    next.run(request).await
}
