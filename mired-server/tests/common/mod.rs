#![allow(dead_code)]

use anyhow::Result;
use mired_server::{connect_pool, run_migrations, sqlite_url_for_path};
use sqlx::SqlitePool;
use tempfile::TempDir;

// Database su file temporaneo con le migrazioni già applicate.
// Il TempDir va tenuto in vita per tutta la durata del test.
pub async fn setup() -> Result<(TempDir, SqlitePool)> {
    let td = TempDir::new()?;
    let url = sqlite_url_for_path(&td.path().join("mired.db"))?;
    let pool = connect_pool(&url).await?;
    run_migrations(&pool).await?;
    Ok((td, pool))
}

// La tabella users appartiene al sottosistema di identità: nei test la popoliamo a mano.
pub async fn add_user(pool: &SqlitePool, id: i64, firstname: &str, lastname: &str, direccion: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO users (user_id, firstname, lastname, telefono_contacto, direccion, user_email, img_url)
         VALUES (?, ?, ?, ?, ?, ?, NULL)",
    )
    .bind(id)
    .bind(firstname)
    .bind(lastname)
    .bind(format!("09900000{:02}", id))
    .bind(direccion)
    .bind(format!("{}@example.com", firstname.to_lowercase()))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_avatar(pool: &SqlitePool, id: i64, img_url: &str) -> Result<()> {
    sqlx::query("UPDATE users SET img_url = ? WHERE user_id = ?")
        .bind(img_url)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn add_rating(pool: &SqlitePool, rater: i64, rated: i64, score: i64) -> Result<()> {
    sqlx::query(
        "INSERT INTO calificaciones (calificador_id, calificado_id, puntuacion, fecha)
         VALUES (?, ?, ?, '2024-01-01 00:00:00')",
    )
    .bind(rater)
    .bind(rated)
    .bind(score)
    .execute(pool)
    .await?;
    Ok(())
}

// Forza la data di un arco per rendere deterministico l'ordinamento.
pub async fn set_edge_date(pool: &SqlitePool, id_mired: i64, fecha: &str) -> Result<()> {
    sqlx::query("UPDATE mired SET fecha = ? WHERE id = ?")
        .bind(fecha)
        .bind(id_mired)
        .execute(pool)
        .await?;
    Ok(())
}

// Cinque agenti con nomi in ordine alfabetico diverso dall'ordine degli id.
pub async fn seed_agents(pool: &SqlitePool) -> Result<()> {
    add_user(pool, 1, "Marco", "Vera", "Quito").await?;
    add_user(pool, 2, "Ana", "Garcia", "Guayaquil").await?;
    add_user(pool, 3, "Luis", "Paredes", "Av. Garcia Moreno, Quito").await?;
    add_user(pool, 4, "Carla", "Mendez", "Cuenca").await?;
    add_user(pool, 5, "Bruno", "Salazar", "Loja").await?;
    Ok(())
}
