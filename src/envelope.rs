//! Uniform response envelopes.
//!
//! Every endpoint answers with exactly one of three shapes: [`Success`],
//! [`List`] or [`Failure`]. They are only built through [`success`], [`list`]
//! and [`error`] so the `success` flag always agrees with the shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Code used by [`error`] when the caller does not supply one.
pub const DEFAULT_ERROR_CODE: &str = "ERROR";

/// Optional pagination fields a caller may attach to a success envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    success: bool,
    pub data: T,
    pub metadata: SuccessMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct List<T> {
    success: bool,
    pub data: Vec<T>,
    pub metadata: ListMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    success: bool,
    pub error: ErrorBody,
    pub timestamp: String,
}

impl Failure {
    /// Attaches the request route to the error body.
    #[must_use]
    pub fn with_route(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.error.method = Some(method.into());
        self.error.path = Some(path.into());
        self
    }
}

/// One of the three canonical shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success(Success<T>),
    List(List<T>),
    Error(Failure),
}

impl<T> Envelope<T> {
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Error(_))
    }
}

impl<T> From<Success<T>> for Envelope<T> {
    fn from(value: Success<T>) -> Self {
        Self::Success(value)
    }
}

impl<T> From<List<T>> for Envelope<T> {
    fn from(value: List<T>) -> Self {
        Self::List(value)
    }
}

impl<T> From<Failure> for Envelope<T> {
    fn from(value: Failure) -> Self {
        Self::Error(value)
    }
}

/// Current time as an ISO-8601 UTC string with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn success<T>(data: T, page: Option<PageInfo>) -> Success<T> {
    let page = page.unwrap_or_default();

    Success {
        success: true,
        data,
        metadata: SuccessMetadata {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            timestamp: timestamp(),
        },
    }
}

/// Builds a paginated list. `page` is 1-based and is not validated.
pub fn list<T>(data: Vec<T>, page: u64, page_size: u64, total: u64) -> List<T> {
    List {
        success: true,
        data,
        metadata: ListMetadata {
            page,
            page_size,
            total,
            has_next: page.saturating_mul(page_size) < total,
            has_previous: page > 1,
            timestamp: timestamp(),
        },
    }
}

pub fn error(message: impl Into<String>, code: Option<&str>, details: Option<Value>) -> Failure {
    Failure {
        success: false,
        error: ErrorBody {
            code: code.unwrap_or(DEFAULT_ERROR_CODE).to_string(),
            message: message.into(),
            details,
            path: None,
            method: None,
        },
        timestamp: timestamp(),
    }
}

/// Serializes an envelope as the JSON body of a response with `status`.
pub fn respond<T: Serialize>(status: StatusCode, envelope: impl Into<Envelope<T>>) -> Response {
    (status, Json(envelope.into())).into_response()
}
