//! Server bootstrap: env config, database bootstrap, routes, serve.

use axum::Router;
use resto_api::{
    common_routes, ensure_database_exists, ensure_schema, restaurant_routes, AppState, Config,
    PgRestaurantStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resto_api=info")),
        )
        .init();

    let config = Config::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_schema(&pool).await?;

    let state = AppState::new(Arc::new(PgRestaurantStore::new(pool)));
    let app = Router::new()
        .merge(common_routes())
        .nest("/v1", restaurant_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
