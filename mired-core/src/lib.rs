//! mired-core: tipi condivisi della rete di agenti (modelli, DTO HTTP, errori).
//! Niente I/O: il crate server si occupa del database e del trasporto.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;

// Re-export utili per ridurre i percorsi nel crate server
pub use error::ErrorBody;
pub use models::{
    connection::{Connection, ConnectionState, InvitationStatus},
    rating::RatingSummary,
    user::{UserProfile, DEFAULT_AVATAR},
};
pub use protocol::http::{
    AceptarRequest, Agente, AgentesResponse, Conexion, ConexionResponse, Contacto,
    ContactosResponse, EstadoResponse, Invitacion, InvitacionesResponse, InvitarRequest,
};
pub use utils::{now_timestamp, TimestampError};
