use std::sync::Arc;

use sakila_api::app::{self, services::AppServices};
use sakila_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sakila_observability::init();

    let config = ApiConfig::from_env();

    let services = match &config.database_url {
        Some(url) => {
            let pool = sakila_store::mysql::connect(url).await?;
            Arc::new(AppServices::mysql(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; serving from the in-memory store");
            let (services, _) = AppServices::in_memory();
            Arc::new(services)
        }
    };

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
