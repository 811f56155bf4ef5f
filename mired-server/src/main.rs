use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use mired_server::{bind_addr, build_sqlite_url, connect_pool, routes, run_migrations, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG ha la precedenza sul livello di default
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Costruisci l'URL del database SQLite
    let db_url = build_sqlite_url().context("build sqlite DATABASE_URL")?;
    tracing::info!(%db_url, "using database");
    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;

    let state = Arc::new(AppState::new(pool));
    let app = routes::router(state);

    // converte la stringa bind in un SocketAddr (host + porta)
    let addr: SocketAddr = bind_addr().parse().context("parse BIND_ADDR")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind tcp listener")?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
