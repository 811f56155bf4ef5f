//! Lettura dei profili dalla tabella `users`. La tabella appartiene al sottosistema
//! di identità: qui si legge soltanto.

use mired_core::UserProfile;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::NetworkError;

#[derive(Clone)]
pub struct UserDirectory {
    pool: SqlitePool,
}

impl UserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<UserProfile>, NetworkError> {
        let row = sqlx::query(
            "SELECT user_id, firstname, lastname, telefono_contacto, direccion, user_email, img_url
             FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(profile_from_row).transpose()
    }

    /// Tutti gli utenti ordinati per (nome, cognome), filtrati opzionalmente su nome o indirizzo.
    /// Confronto e ordinamento ignorano maiuscole anche fuori dall'ASCII ("ángel" trova "ÁNGEL"),
    /// cosa che LIKE di SQLite non fa: il filtro gira quindi in Rust.
    pub async fn search(&self, text: Option<&str>) -> Result<Vec<UserProfile>, NetworkError> {
        let needle = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let rows = sqlx::query(
            "SELECT user_id, firstname, lastname, telefono_contacto, direccion, user_email, img_url
             FROM users",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut users = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(needle) = needle {
            users.retain(|u| matches_search(u, &needle));
        }
        users.sort_by_cached_key(|u| (u.firstname.to_lowercase(), u.lastname.to_lowercase(), u.id));
        Ok(users)
    }
}

/// `needle` va passato già in minuscolo.
pub(crate) fn matches_search(user: &UserProfile, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&user.firstname)
        || hit(&user.lastname)
        || hit(&user.nombre())
        || user.direccion.as_deref().is_some_and(hit)
}

pub(crate) fn profile_from_row(row: &SqliteRow) -> Result<UserProfile, NetworkError> {
    let firstname: Option<String> = row.try_get("firstname")?;
    let lastname: Option<String> = row.try_get("lastname")?;
    Ok(UserProfile {
        id: row.try_get("user_id")?,
        firstname: firstname.unwrap_or_default(),
        lastname: lastname.unwrap_or_default(),
        telefono: row.try_get("telefono_contacto")?,
        direccion: row.try_get("direccion")?,
        email: row.try_get("user_email")?,
        img_url: row.try_get("img_url")?,
    })
}
