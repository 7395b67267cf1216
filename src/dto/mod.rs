use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreateRequest {
    /// Owning account, positive
    #[validate(range(min = 1, message = "Number must be greater than 0"))]
    pub account_id: i64,
    /// Author, positive
    #[validate(range(min = 1, message = "Number must be greater than 0"))]
    pub user_id: i64,
    /// Note title, 1 to 255 characters
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Note content, non-empty
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreateResult {
    /// Identifier generated by the store
    pub note_id: i64,
}

/// A single failed field constraint reported by the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Field name, empty when the body itself is malformed
    pub path: String,
    /// Human readable reason
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
