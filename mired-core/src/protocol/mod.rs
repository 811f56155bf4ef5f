pub mod http;

// Re-export comodi
pub use http::{
    AceptarRequest, Agente, AgentesResponse, Conexion, ConexionResponse, Contacto,
    ContactosResponse, EstadoResponse, Invitacion, InvitacionesResponse, InvitarRequest,
};
