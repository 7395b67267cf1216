pub mod classifier;

pub use classifier::BusinessRuleViolation;

use std::sync::Arc;

use validator::{Validate, ValidationErrors};

use crate::{
    dto::{NoteCreateRequest, NoteCreateResult},
    repository::{Connector, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("invalid note request: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    BusinessRule(#[from] BusinessRuleViolation),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl From<Result<BusinessRuleViolation, StoreError>> for NoteError {
    fn from(classified: Result<BusinessRuleViolation, StoreError>) -> Self {
        match classified {
            Ok(violation) => Self::BusinessRule(violation),
            Err(error) => Self::Persistence(error),
        }
    }
}

#[derive(Clone)]
pub struct NoteService {
    connector: Arc<dyn Connector>,
}

impl NoteService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Creates a note through the store's creation command. The connection is
    /// opened for this call only and closed on every path once acquired.
    /// Requests breaking the field constraints never reach the store.
    pub async fn create_note(
        &self,
        request: NoteCreateRequest,
    ) -> Result<NoteCreateResult, NoteError> {
        request.validate()?;

        let mut connection = self
            .connector
            .connect()
            .await
            .map_err(|e| NoteError::from(classifier::classify(e)))?;

        let outcome = connection.create_note(&request).await;

        if let Err(e) = connection.close().await {
            tracing::warn!("failed to release store connection: {e}");
        }

        match outcome {
            Ok(result) => {
                tracing::debug!(
                    note_id = result.note_id,
                    account_id = request.account_id,
                    "note created"
                );
                Ok(result)
            }
            Err(e) => Err(classifier::classify(e).into()),
        }
    }
}
