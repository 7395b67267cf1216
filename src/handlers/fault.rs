//! Top-level handling of failures no handler recognizes.

use std::{error::Error, sync::Arc};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{config::Environment, envelope};

pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Unrecognized failure propagated out of a handler. It always renders as the
/// generic 500 envelope; [`handle_faults`] decides what else is revealed.
#[derive(Debug)]
pub struct ApiError(Box<dyn Error + Send + Sync>);

impl<E> From<E> for ApiError
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self(Box::new(error))
    }
}

/// Diagnostic context carried from [`ApiError`] to [`handle_faults`] through
/// the response extensions.
#[derive(Debug, Clone)]
struct Fault {
    message: String,
    chain: Arc<[String]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut chain = Vec::new();
        let mut source = self.0.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        let mut response = envelope::respond::<()>(
            StatusCode::INTERNAL_SERVER_ERROR,
            envelope::error(GENERIC_MESSAGE, Some(INTERNAL_SERVER_ERROR), None),
        );
        response.extensions_mut().insert(Fault {
            message: self.0.to_string(),
            chain: chain.into(),
        });
        response
    }
}

/// Logs faults with their request context. In development the envelope is
/// rebuilt with the real message and the source chain as `details`.
pub async fn handle_faults(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let Some(fault) = response.extensions().get::<Fault>().cloned() else {
        return response;
    };

    tracing::error!(
        %method,
        %path,
        chain = ?fault.chain,
        "Error occurred: {}",
        fault.message
    );

    if environment.is_development() {
        let details = Value::from(fault.chain.to_vec());
        return envelope::respond::<()>(
            response.status(),
            envelope::error(fault.message, Some(INTERNAL_SERVER_ERROR), Some(details)),
        );
    }

    response
}
