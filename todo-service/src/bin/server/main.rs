use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use todo_service::account::service::AccountService;
use todo_service::config::Config;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::health::PostgresHealthCheck;
use todo_service::outbound::notifications::LogResetNotifier;
use todo_service::repositories::PostgresAccountRepository;
use todo_service::repositories::PostgresTodoRepository;
use todo_service::todo::service::TodoService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        run_mode = %config.run_mode,
        "Service starting"
    );

    tracing::info!(
        database_host = %config.database.host,
        database_port = config.database.port,
        database_name = %config.database.name,
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(config.database.connect_options())
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool.clone()));
    let reset_notifier = Arc::new(LogResetNotifier::new());

    let account_service = Arc::new(AccountService::new(
        account_repository,
        reset_notifier,
        Arc::clone(&authenticator),
        config.server.public_url.clone(),
    ));
    let todo_service = Arc::new(TodoService::new(todo_repository));
    let health_check = Arc::new(PostgresHealthCheck::new(pg_pool));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application =
        create_router(account_service, todo_service, authenticator, health_check);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
