use time::{macros::format_description, OffsetDateTime};

/// Errore di formattazione delle date.
pub type TimestampError = time::error::Format;

/// Restituisce l'istante corrente in UTC nel formato DATETIME (es. "2025-11-02 12:34:56").
pub fn now_timestamp() -> Result<String, TimestampError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Formato a larghezza fissa: l'ordine lessicografico coincide con quello cronologico.
pub fn format_timestamp(t: OffsetDateTime) -> Result<String, TimestampError> {
    t.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
}
