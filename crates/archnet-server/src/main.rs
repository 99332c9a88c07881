//! archnet-server — standalone REST server for the ArchNet platform.
//!
//! Reads config from env vars:
//!   ARCHNET_DATABASE_URL — Postgres connection string (required)
//!   ARCHNET_JWT_SECRET   — JWT HMAC secret (required)
//!   ARCHNET_BIND_ADDR    — listen address (default: 0.0.0.0:4000)

use archnet_postgres::PgStores;
use archnet_server::middleware::jwt::JwtConfig;
use archnet_server::router::build_router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,archnet_server=debug".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("ARCHNET_DATABASE_URL").expect("ARCHNET_DATABASE_URL must be set");
    let jwt_secret = std::env::var("ARCHNET_JWT_SECRET").expect("ARCHNET_JWT_SECRET must be set");
    let bind_addr =
        std::env::var("ARCHNET_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4000".into());

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");
    tracing::info!("Connected to database");

    let stores = PgStores::new(pool);
    let jwt_config = JwtConfig::from_secret(jwt_secret.as_bytes());
    let app = build_router(stores, jwt_config);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {bind_addr}: {e}"));
    tracing::info!("archnet-server listening on {bind_addr}");

    axum::serve(listener, app).await.expect("server error");
}
