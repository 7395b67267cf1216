use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

use super::{Connection, Connector, StoreError};
use crate::dto::{NoteCreateRequest, NoteCreateResult};

mod embedded {
    refinery::embed_migrations!("migrations");
}

const CREATE_NOTE: &str = "SELECT note_id FROM functional.sp_note_create($1, $2, $3, $4)";

/// Opens a fresh `PostgreSQL` connection for every command.
pub struct PgConnector {
    database_dsn: String,
}

impl PgConnector {
    pub const fn new(database_dsn: String) -> Self {
        Self { database_dsn }
    }

    async fn open(&self) -> Result<PgConnection, StoreError> {
        let (client, con) = tokio_postgres::connect(&self.database_dsn, NoTls)
            .await
            .map_err(store_error)?;

        let driver = tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(PgConnection {
            client: Some(client),
            driver: Some(driver),
        })
    }

    /// Applies the embedded schema migrations over a dedicated connection.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut connection = self.open().await?;
        let client = connection.client.as_mut().ok_or(StoreError::Closed)?;

        let migrations_report = embedded::migrations::runner().run_async(client).await;
        connection.close().await?;
        let migrations_report = migrations_report?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        Ok(Box::new(self.open().await?))
    }
}

pub struct PgConnection {
    client: Option<Client>,
    driver: Option<JoinHandle<()>>,
}

#[async_trait]
impl Connection for PgConnection {
    async fn create_note(
        &mut self,
        request: &NoteCreateRequest,
    ) -> Result<NoteCreateResult, StoreError> {
        let client = self.client.as_ref().ok_or(StoreError::Closed)?;

        let rows = client
            .query(
                CREATE_NOTE,
                &[
                    &request.account_id,
                    &request.user_id,
                    &request.title,
                    &request.content,
                ],
            )
            .await
            .map_err(store_error)?;

        let row = rows.first().ok_or(StoreError::MissingIdentifier)?;
        let note_id: i64 = row.try_get("note_id").map_err(store_error)?;

        Ok(NoteCreateResult { note_id })
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        // Dropping the client ends the connection future.
        drop(self.client.take());

        if let Some(driver) = self.driver.take() {
            driver.await?;
        }

        Ok(())
    }
}

/// Errors raised by the server keep their SQLSTATE and message; client side
/// failures stay wrapped.
fn store_error(e: tokio_postgres::Error) -> StoreError {
    match e.as_db_error() {
        Some(db) => StoreError::Rejected {
            code: db.code().code().to_string(),
            message: db.message().to_string(),
            detail: db.detail().map(str::to_string),
        },
        None => StoreError::Postgres(e),
    }
}
