use serde::{Deserialize, Serialize};

use crate::models::{Connection, ConnectionState, InvitationStatus, RatingSummary, UserProfile};
/*
    DTO http per gli endpoint della rete (mired).
    I nomi dei campi sono quelli già usati dai client mobile, quindi restano in spagnolo.
*/

// endpoint=contactos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contacto {
    pub id: i64,
    pub nombre: String,
    pub telefono: Option<String>,
    pub ciudad: Option<String>,
    pub email: Option<String>,
    pub imagen: String,
    pub fecha_conexion: String,
    pub calificacion: RatingSummary,
}

impl Contacto {
    pub fn new(user: &UserProfile, fecha_conexion: String, calificacion: RatingSummary) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre(),
            telefono: user.telefono.clone(),
            ciudad: user.direccion.clone(),
            email: user.email.clone(),
            imagen: user.imagen(),
            fecha_conexion,
            calificacion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactosResponse {
    pub success: bool,
    pub contactos: Vec<Contacto>,
}

// endpoint=agentes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agente {
    pub id: i64,
    pub nombre: String,
    pub telefono: Option<String>,
    pub ciudad: Option<String>,
    pub email: Option<String>,
    pub imagen: String,
    pub calificacion: RatingSummary,
    pub ya_invitado: bool,
}

impl Agente {
    pub fn new(user: &UserProfile, calificacion: RatingSummary, ya_invitado: bool) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre(),
            telefono: user.telefono.clone(),
            ciudad: user.direccion.clone(),
            email: user.email.clone(),
            imagen: user.imagen(),
            calificacion,
            ya_invitado,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentesResponse {
    pub success: bool,
    pub agentes: Vec<Agente>,
}

// endpoint=invitaciones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitacion {
    pub id_mired: i64,
    pub id_remitente: i64,
    pub nombre: String,
    pub telefono: Option<String>,
    pub imagen: String,
    pub fecha_invitacion: String,
}

impl Invitacion {
    /// `remitente` è il profilo di chi ha inviato l'invito.
    pub fn new(edge: &Connection, remitente: &UserProfile) -> Self {
        Self {
            id_mired: edge.id,
            id_remitente: edge.requester_id,
            nombre: remitente.nombre(),
            telefono: remitente.telefono.clone(),
            imagen: remitente.imagen(),
            fecha_invitacion: edge.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitacionesResponse {
    pub success: bool,
    pub invitaciones: Vec<Invitacion>,
}

// POST /api/mired/invitar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitarRequest {
    pub user_id: Option<i64>,
    pub destinatario_id: i64,
}

// POST /api/mired/aceptar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AceptarRequest {
    pub user_id: Option<i64>,
    pub remitente_id: i64,
}

/// Arco della rete come esposto dagli endpoint di scrittura.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conexion {
    pub id_mired: i64,
    pub id_remitente: i64,
    pub id_destinatario: i64,
    pub estado: ConnectionState,
    pub fecha: String,
}

impl From<Connection> for Conexion {
    fn from(c: Connection) -> Self {
        Self {
            id_mired: c.id,
            id_remitente: c.requester_id,
            id_destinatario: c.recipient_id,
            estado: c.state,
            fecha: c.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConexionResponse {
    pub success: bool,
    pub conexion: Conexion,
}

// GET /api/mired/estado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoResponse {
    pub success: bool,
    pub estado: InvitationStatus,
}
