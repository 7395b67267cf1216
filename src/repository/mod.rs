#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgConnector;

use async_trait::async_trait;

use crate::dto::{NoteCreateRequest, NoteCreateResult};

/// Failure raised by the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store rejected the command with an error code (SQLSTATE).
    #[error(
        "{message} (SQLSTATE {code}){}",
        .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
    )]
    Rejected {
        code: String,
        message: String,
        detail: Option<String>,
    },

    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("creation command returned no identifier")]
    MissingIdentifier,

    #[error("connection already closed")]
    Closed,

    #[error("connection task failed: {0}")]
    Driver(#[from] tokio::task::JoinError),

    #[error("migration failed: {0}")]
    Migration(#[from] refinery::Error),
}

impl StoreError {
    /// Error code reported by the store. Only server-side rejections carry
    /// one; `store_error` turns every such `tokio_postgres` error into
    /// `Rejected`.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Opens connections to the note store.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError>;
}

/// A single live connection. Callers must `close` it on every path once it
/// has been acquired.
#[async_trait]
pub trait Connection: Send {
    async fn create_note(
        &mut self,
        request: &NoteCreateRequest,
    ) -> Result<NoteCreateResult, StoreError>;

    async fn close(&mut self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_display_carries_code_and_detail() {
        let error = StoreError::Rejected {
            code: "23503".to_string(),
            message: "insert violates foreign key constraint".to_string(),
            detail: Some("Key (user_id)=(7) is not present".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "insert violates foreign key constraint (SQLSTATE 23503): \
             Key (user_id)=(7) is not present"
        );
        assert_eq!(error.code(), Some("23503"));
    }

    #[test]
    fn rejection_without_detail() {
        let error = StoreError::Rejected {
            code: "57014".to_string(),
            message: "canceling statement".to_string(),
            detail: None,
        };

        assert_eq!(error.to_string(), "canceling statement (SQLSTATE 57014)");
    }

    #[test]
    fn client_side_errors_have_no_code() {
        assert_eq!(StoreError::MissingIdentifier.code(), None);
        assert_eq!(StoreError::Closed.code(), None);
    }
}
