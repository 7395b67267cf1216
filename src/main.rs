use std::sync::Arc;

use note_service::{config, repository::PgConnector, routes, service::NoteService};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().expect("failed to locate or load config file");
    tracing::info!(
        "Successfully loaded note service config ({:?} mode)",
        cfg.environment
    );

    // Store setup and migration
    let connector = PgConnector::new(cfg.database_dsn.clone());
    connector.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(connector)));

    let router = routes::router(service, cfg.environment);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("failed to bind to address");
    let addr = listener.local_addr().expect("listener has no local address");

    tracing::info!("Note service starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}
