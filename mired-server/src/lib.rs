use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod controllers;
pub mod directory;
pub mod discovery;
pub mod error;
pub mod invitations;
pub mod ratings;
pub mod routes;
pub mod service;
pub mod store;

pub use error::NetworkError;
pub use service::MiredService;

/// Stato condiviso tra gli handler. Il pool è l'unica risorsa mutabile condivisa.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub service: MiredService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let service = MiredService::new(pool.clone());
        Self { pool, service }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    // su unix il percorso assoluto porta già lo slash iniziale
    if s.starts_with('/') {
        Ok(format!("sqlite://{}", s))
    } else {
        Ok(format!("sqlite:///{}", s))
    }
}

/// Crea un DB URL SQLite leggendo la variabile d'ambiente DATABASE_URL.
/// Se non è impostata, usa "mired.db" nella directory corrente.
pub fn build_sqlite_url() -> anyhow::Result<String> {
    let raw = std::env::var("DATABASE_URL").unwrap_or_else(|_| "mired.db".to_string());
    sqlite_url_from(&raw)
}

/// Normalizza un valore di DATABASE_URL (percorso nudo o con prefisso `sqlite://`).
pub fn sqlite_url_from(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // "sqlite:///abs/path" -> "/abs/path", "sqlite://rel.db" -> "rel.db"
    let path_part = raw.strip_prefix("sqlite://").unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

/// Indirizzo di binding da BIND_ADDR, default 127.0.0.1:3000.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string())
}

// Connect to the database and return a connection pool.
// Le foreign key vanno attivate su ogni connessione, non con un PRAGMA una tantum.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parse sqlite url {}", db_url))?
        .create_if_missing(true)
        .foreign_keys(true);
    // ogni connessione in-memory è un database a sé: una sola connessione
    let max = if db_url.contains(":memory:") { 1 } else { 10 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max)
        .connect_with(opts)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea tabelle e indici se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id           INTEGER PRIMARY KEY,
            firstname         TEXT NOT NULL DEFAULT '',
            lastname          TEXT NOT NULL DEFAULT '',
            telefono_contacto TEXT,
            direccion         TEXT,
            user_email        TEXT,
            img_url           TEXT
        );"#,
        r#"
        CREATE TABLE IF NOT EXISTS mired (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            id_comprador INTEGER NOT NULL,
            id_vendedor  INTEGER NOT NULL,
            estado       INTEGER NOT NULL DEFAULT 0 CHECK (estado IN (0, 1)),
            fecha        TEXT NOT NULL,
            CHECK (id_comprador <> id_vendedor),
            FOREIGN KEY(id_comprador) REFERENCES users(user_id),
            FOREIGN KEY(id_vendedor)  REFERENCES users(user_id)
        );"#,
        // un solo arco per coppia non ordinata, qualunque sia la direzione
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS mired_coppia
            ON mired (min(id_comprador, id_vendedor), max(id_comprador, id_vendedor));"#,
        r#"
        CREATE TABLE IF NOT EXISTS calificaciones (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            calificador_id INTEGER NOT NULL,
            calificado_id  INTEGER NOT NULL,
            puntuacion     INTEGER NOT NULL CHECK (puntuacion BETWEEN 1 AND 5),
            fecha          TEXT NOT NULL,
            FOREIGN KEY(calificador_id) REFERENCES users(user_id),
            FOREIGN KEY(calificado_id)  REFERENCES users(user_id)
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS calificaciones_calificado
            ON calificaciones (calificado_id);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", s.trim().chars().take(40).collect::<String>().replace('\n', " ")))?;
    }
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
