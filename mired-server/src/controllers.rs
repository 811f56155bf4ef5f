use axum::{extract::{Extension, Query}, http::StatusCode, response::{IntoResponse, Response}, Json};
use mired_core::{AceptarRequest, ConexionResponse, EstadoResponse, InvitarRequest};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::NetworkError, AppState};

/// Endpoint selezionabili con `?endpoint=` su GET /api/mired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Contactos,
    Agentes,
    Invitaciones,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, NetworkError> {
        match raw {
            "contactos" => Ok(Endpoint::Contactos),
            "agentes" => Ok(Endpoint::Agentes),
            "invitaciones" => Ok(Endpoint::Invitaciones),
            other => Err(NetworkError::UnknownEndpoint(other.to_string())),
        }
    }
}

/// Parametri query di GET /api/mired. `user_id` resta stringa per poter
/// rispondere 401 (e non 400) quando non è un intero valido.
#[derive(Debug, Default, Deserialize)]
pub struct MiredParams {
    pub endpoint: Option<String>,
    pub user_id: Option<String>,
    pub busqueda: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EstadoParams {
    pub user_id: Option<String>,
    pub otro_id: Option<String>,
}

/// `user_id` deve essere un intero positivo.
pub fn parse_user_id(raw: Option<&str>) -> Result<i64, NetworkError> {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(NetworkError::MissingUser),
    }
}

fn require_user(user_id: Option<i64>) -> Result<i64, NetworkError> {
    match user_id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(NetworkError::MissingUser),
    }
}

/// Handler per GET /api/mired?endpoint=...&user_id=...
pub async fn mired(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<MiredParams>,
) -> Result<Response, NetworkError> {
    // user_id viene controllato prima dell'endpoint: senza utente è sempre 401
    let user_id = parse_user_id(params.user_id.as_deref()).inspect_err(|_| {
        tracing::warn!(endpoint = ?params.endpoint, "request without valid user_id");
    })?;
    let endpoint = Endpoint::parse(params.endpoint.as_deref().unwrap_or_default())?;

    let resp = match endpoint {
        Endpoint::Contactos => Json(state.service.contactos(user_id).await?).into_response(),
        Endpoint::Agentes => {
            Json(state.service.agentes(user_id, params.busqueda.as_deref()).await?).into_response()
        }
        Endpoint::Invitaciones => Json(state.service.invitaciones(user_id).await?).into_response(),
    };
    Ok(resp)
}

/// Handler per POST /api/mired/invitar
pub async fn invitar(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<InvitarRequest>,
) -> Result<(StatusCode, Json<ConexionResponse>), NetworkError> {
    let user_id = require_user(req.user_id)?;
    let resp = state.service.invitar(user_id, req.destinatario_id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// Handler per POST /api/mired/aceptar
pub async fn aceptar(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<AceptarRequest>,
) -> Result<Json<ConexionResponse>, NetworkError> {
    let user_id = require_user(req.user_id)?;
    let resp = state.service.aceptar(user_id, req.remitente_id).await?;
    Ok(Json(resp))
}

/// Handler per GET /api/mired/estado?user_id=...&otro_id=...
pub async fn estado(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<EstadoParams>,
) -> Result<Json<EstadoResponse>, NetworkError> {
    let user_id = parse_user_id(params.user_id.as_deref())?;
    let otro_id = params
        .otro_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or(NetworkError::InvalidParam("otro_id"))?;
    Ok(Json(state.service.estado(user_id, otro_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_must_be_positive_integer() {
        assert_eq!(parse_user_id(Some("7")).ok(), Some(7));
        assert_eq!(parse_user_id(Some(" 12 ")).ok(), Some(12));
        assert!(matches!(parse_user_id(None), Err(NetworkError::MissingUser)));
        assert!(matches!(parse_user_id(Some("0")), Err(NetworkError::MissingUser)));
        assert!(matches!(parse_user_id(Some("-3")), Err(NetworkError::MissingUser)));
        assert!(matches!(parse_user_id(Some("abc")), Err(NetworkError::MissingUser)));
    }

    #[test]
    fn endpoint_selector() {
        assert_eq!(Endpoint::parse("agentes").ok(), Some(Endpoint::Agentes));
        assert!(matches!(Endpoint::parse("foo"), Err(NetworkError::UnknownEndpoint(e)) if e == "foo"));
        assert!(matches!(Endpoint::parse(""), Err(NetworkError::UnknownEndpoint(_))));
    }
}
