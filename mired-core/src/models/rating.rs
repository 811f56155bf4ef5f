use serde::{Deserialize, Serialize};

/// Aggregato delle valutazioni ricevute da un utente, esposto come `calificacion`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Media aritmetica arrotondata ad un decimale (0 se non ci sono valutazioni).
    pub promedio: f64,
    pub total: i64,
}

impl RatingSummary {
    pub const EMPTY: RatingSummary = RatingSummary { promedio: 0.0, total: 0 };

    /// Costruisce l'aggregato a partire dal risultato di `AVG`/`COUNT`.
    pub fn from_aggregate(average: Option<f64>, count: i64) -> Self {
        match average {
            Some(avg) if count > 0 => RatingSummary { promedio: round_one_decimal(avg), total: count },
            _ => Self::EMPTY,
        }
    }

    /// Calcola l'aggregato da una lista di punteggi grezzi.
    pub fn from_scores(scores: &[i64]) -> Self {
        if scores.is_empty() {
            return Self::EMPTY;
        }
        let sum: i64 = scores.iter().sum();
        let count = scores.len() as i64;
        Self::from_aggregate(Some(sum as f64 / count as f64), count)
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
