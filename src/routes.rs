use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    config::Environment,
    handlers::{fallback, fault, rest},
    service::NoteService,
};

/// Builds the application router: versioned API, Swagger UI, not-found
/// fallback and fault reporting.
pub fn router(service: Arc<NoteService>, environment: Environment) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/v1", v1_router(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::not_found)
        .layer(middleware::from_fn_with_state(environment, fault::handle_faults))
        .layer(TraceLayer::new_for_http())
}

fn v1_router(service: Arc<NoteService>) -> Router {
    // Public routes live under /external once there are any.
    Router::new()
        .nest("/internal", internal_router())
        .with_state(service)
}

fn internal_router() -> Router<Arc<NoteService>> {
    Router::new()
        .route("/note", post(rest::create_note))
        .method_not_allowed_fallback(fallback::not_found)
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
