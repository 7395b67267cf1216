use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::Response,
};

use crate::envelope;

pub const NOT_FOUND: &str = "NOT_FOUND";

/// Answers every request that matches no route.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();

    envelope::respond::<()>(
        StatusCode::NOT_FOUND,
        envelope::error(format!("Route {method} {path} not found"), Some(NOT_FOUND), None)
            .with_route(method.as_str(), path),
    )
}
