use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use axum_macros::debug_handler;
use serde_json::Value;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{FieldViolation, NoteCreateRequest, NoteCreateResult},
    envelope,
    handlers::fault::ApiError,
    service::{NoteError, NoteService},
    validation,
};

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

#[derive(OpenApi)]
#[openapi(
    paths(create_note),
    components(schemas(NoteCreateRequest, NoteCreateResult, FieldViolation)),
    tags(
        (name = "notes", description = "Internal notes API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/v1/internal/note",
    request_body = NoteCreateRequest,
    responses(
        (status = 201, description = "Note created, data carries the new noteId", body = NoteCreateResult),
        (status = 400, description = "VALIDATION_ERROR or BUSINESS_RULE_ERROR envelope"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let violations = match payload {
        Ok(Json(body)) => match validation::note_create(&body) {
            Ok(request) => return create(&service, request).await,
            Err(violations) => violations,
        },
        Err(rejection) => vec![FieldViolation::new("", rejection.body_text())],
    };

    validation_failed(violations)
}

fn validation_failed(violations: Vec<FieldViolation>) -> Result<Response, ApiError> {
    tracing::debug!("rejected note body: {} violation(s)", violations.len());

    Ok(envelope::respond::<()>(
        StatusCode::BAD_REQUEST,
        envelope::error(
            "Validation failed",
            Some(VALIDATION_ERROR),
            Some(serde_json::to_value(violations)?),
        ),
    ))
}

async fn create(service: &NoteService, request: NoteCreateRequest) -> Result<Response, ApiError> {
    match service.create_note(request).await {
        Ok(result) => Ok(envelope::respond::<NoteCreateResult>(
            StatusCode::CREATED,
            envelope::success(result, None),
        )),
        Err(NoteError::Invalid(errors)) => validation_failed(validation::violations(&errors)),
        Err(NoteError::BusinessRule(violation)) => {
            tracing::info!("note creation rejected by business rule: {}", violation);
            Ok(envelope::respond::<()>(
                StatusCode::BAD_REQUEST,
                envelope::error(violation.message, Some(violation.code), None),
            ))
        }
        Err(NoteError::Persistence(e)) => Err(e.into()),
    }
}
