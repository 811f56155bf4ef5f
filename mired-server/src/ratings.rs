use std::collections::HashMap;

use mired_core::RatingSummary;
use sqlx::SqlitePool;

use crate::error::NetworkError;

/// Media e numero delle valutazioni ricevute (`calificaciones.calificado_id`).
/// Nessun peso o decadimento: media aritmetica semplice.
#[derive(Clone)]
pub struct RatingAggregator {
    pool: SqlitePool,
}

impl RatingAggregator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn aggregate(&self, rated_user: i64) -> Result<RatingSummary, NetworkError> {
        let (average, count): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(puntuacion), COUNT(*) FROM calificaciones WHERE calificado_id = ?",
        )
        .bind(rated_user)
        .fetch_one(&self.pool)
        .await?;
        Ok(RatingSummary::from_aggregate(average, count))
    }

    /// Aggregati di più utenti con una sola query raggruppata.
    /// Gli utenti senza valutazioni non compaiono nella mappa: vedi [`RatingAggregator::summary_of`].
    pub async fn aggregate_many(&self, rated_users: &[i64]) -> Result<HashMap<i64, RatingSummary>, NetworkError> {
        if rated_users.is_empty() {
            return Ok(HashMap::new());
        }
        // la lista di id viaggia come un unico parametro JSON
        let ids = serde_json::Value::from(rated_users.to_vec()).to_string();
        let rows: Vec<(i64, Option<f64>, i64)> = sqlx::query_as(
            "SELECT calificado_id, AVG(puntuacion), COUNT(*)
             FROM calificaciones
             WHERE calificado_id IN (SELECT value FROM json_each(?))
             GROUP BY calificado_id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, average, count)| (id, RatingSummary::from_aggregate(average, count)))
            .collect())
    }

    pub fn summary_of(summaries: &HashMap<i64, RatingSummary>, user: i64) -> RatingSummary {
        summaries.get(&user).copied().unwrap_or_default()
    }
}
