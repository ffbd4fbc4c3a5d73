mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::strokes::{MemoryStore, PgStrokeStore, StrokeStore, env_parse};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let port: u16 = env_parse("PORT", 3000);

    // Postgres when configured, otherwise a process-local store.
    let store: Arc<dyn StrokeStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = db::init_pool(&database_url)
                .await
                .expect("database init failed");
            tracing::info!("stroke store: postgres");
            Arc::new(PgStrokeStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; strokes are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let app = routes::app(state::AppState::new(store));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "sketchboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
