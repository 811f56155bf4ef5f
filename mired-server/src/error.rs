use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use mired_core::ErrorBody;

/// Errori della rete di agenti. Ogni variante diventa una risposta determinata, mai parziale.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("user_id requerido")]
    MissingUser,

    #[error("Endpoint no encontrado")]
    UnknownEndpoint(String),

    #[error("parámetro inválido: {0}")]
    InvalidParam(&'static str),

    #[error("no se puede invitar a uno mismo")]
    SelfInvite,

    #[error("usuario no encontrado")]
    UnknownUser,

    /// Esiste già un arco (in qualunque stato) tra i due utenti.
    #[error("ya existe una relación entre {0} y {1}")]
    Conflict(i64, i64),

    /// Nessun invito pendente remitente -> destinatario.
    #[error("invitación no encontrada")]
    NotFound,

    #[error("estado de conexión inválido: {0}")]
    CorruptState(i64),

    #[error("db error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("timestamp error: {0}")]
    Timestamp(#[from] mired_core::TimestampError),
}

impl NetworkError {
    pub fn status(&self) -> StatusCode {
        match self {
            NetworkError::MissingUser => StatusCode::UNAUTHORIZED,
            NetworkError::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            NetworkError::InvalidParam(_) | NetworkError::SelfInvite => StatusCode::BAD_REQUEST,
            NetworkError::UnknownUser => StatusCode::NOT_FOUND,
            NetworkError::Conflict(..) => StatusCode::CONFLICT,
            NetworkError::NotFound => StatusCode::NOT_FOUND,
            NetworkError::CorruptState(_) | NetworkError::Storage(_) | NetworkError::Timestamp(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Traduce le violazioni di vincolo del database negli errori di dominio.
    pub(crate) fn from_insert(e: sqlx::Error, requester: i64, recipient: i64) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return NetworkError::Conflict(requester, recipient);
            }
            if db.is_foreign_key_violation() {
                return NetworkError::UnknownUser;
            }
            if db.is_check_violation() {
                return NetworkError::SelfInvite;
            }
        }
        NetworkError::Storage(e)
    }
}

impl IntoResponse for NetworkError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // il dettaglio resta nei log
            tracing::error!(error = %self, "network request failed");
            "error interno del servidor".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}
