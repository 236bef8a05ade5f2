use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use auth::TokenCodec;
use auth::TokenIssuer;
use auth::TokenValidator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_api::config::Config;
use user_api::domain::user::service::UserService;
use user_api::inbound::http::router::create_router;
use user_api::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_hours = config.jwt.expiration_hours,
        token_header = %config.jwt.header_name,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let signing_key = config.jwt.signing_key()?;
    if !signing_key.is_recommended_length() {
        tracing::warn!(
            recommended_bytes = SigningKey::RECOMMENDED_LENGTH,
            "JWT secret is shorter than recommended for HS256"
        );
    }

    let codec = Arc::new(TokenCodec::new(&signing_key));
    let issuer = Arc::new(TokenIssuer::new(Arc::clone(&codec), config.jwt.ttl()?)?);
    tracing::info!(
        ttl_seconds = issuer.ttl().num_seconds(),
        "Token issuer ready"
    );
    let validator = Arc::new(TokenValidator::new(codec));
    let authenticator = Arc::new(Authenticator::new(issuer));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user_service = Arc::new(UserService::new(user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        authenticator,
        validator,
        config.jwt.bearer_settings()?,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
