use std::sync::Arc;

use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::grpc::interceptor::AccessInterceptorLayer;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::grpc::ProfileGrpcService;
use auth_service::outbound::repositories::PostgresProfileRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::proto::auth_service_server::AuthServiceServer;
use auth_service::proto::profile_service_server::ProfileServiceServer;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The signing secret is loaded exactly once; a missing secret is a
    // fatal startup condition, never a per-call error.
    if config.jwt.secret.trim().is_empty() {
        anyhow::bail!("jwt.secret must be configured (JWT__SECRET)");
    }

    tracing::info!(
        database_url = %config.database.url,
        grpc_port = config.server.grpc_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_codec = Arc::new(TokenCodec::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let profile_repository = Arc::new(PostgresProfileRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        profile_repository,
        Arc::clone(&token_codec),
    ));

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .layer(AccessInterceptorLayer::new(token_codec))
        .add_service(AuthServiceServer::new(AuthGrpcService::new(Arc::clone(
            &auth_service,
        ))))
        .add_service(ProfileServiceServer::new(ProfileGrpcService::new(
            auth_service,
        )))
        .serve(grpc_address)
        .await?;

    Ok(())
}
