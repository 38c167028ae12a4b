use std::net::SocketAddr;

use migration::{Migrator, MigratorTrait};
use sms_service::bootstrap::{initialize_admin_user, initialize_sample_subjects};
use sms_service::redis_service::init_redis_connection;
use sms_service::static_service::get_database_connection;
use sms_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    // Initialize database connection
    let db_connection = get_database_connection().await;

    tracing::info!("Running database migrations...");
    Migrator::up(db_connection, None).await?;

    // Initialize Redis connection
    tracing::info!("Initializing Redis connection...");
    if let Err(e) = init_redis_connection().await {
        tracing::error!("Failed to initialize Redis connection: {}", e);
        tracing::warn!("Continuing without Redis (logins will fail until it is back)...");
    } else {
        tracing::info!("Redis connection initialized successfully");
    }

    // Initialize default admin user and subject catalogue
    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(db_connection).await {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    if let Err(e) = initialize_sample_subjects().await {
        tracing::error!("Failed to seed subjects: {}", e);
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
