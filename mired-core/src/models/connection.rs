use serde::{Deserialize, Serialize};

/// Stato di un arco della rete. Sul database è la colonna `estado` (0/1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aceptada")]
    Accepted,
}

impl ConnectionState {
    pub fn from_estado(estado: i64) -> Option<Self> {
        match estado {
            0 => Some(ConnectionState::Pending),
            1 => Some(ConnectionState::Accepted),
            _ => None,
        }
    }

    pub fn estado(self) -> i64 {
        match self {
            ConnectionState::Pending => 0,
            ConnectionState::Accepted => 1,
        }
    }
}

/// Arco tra due utenti: direzionale alla creazione, non orientato una volta accettato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: i64,
    pub requester_id: i64,
    pub recipient_id: i64,
    pub state: ConnectionState,
    pub created_at: String, // "YYYY-MM-DD HH:MM:SS" UTC
}

impl Connection {
    /// true se `user` è uno dei due estremi.
    pub fn involves(&self, user: i64) -> bool {
        self.requester_id == user || self.recipient_id == user
    }

    /// L'altro estremo rispetto a `user`, se `user` partecipa all'arco.
    pub fn peer_of(&self, user: i64) -> Option<i64> {
        if self.requester_id == user {
            Some(self.recipient_id)
        } else if self.recipient_id == user {
            Some(self.requester_id)
        } else {
            None
        }
    }
}

/// Stato della coppia (utente, altro) visto dal lato dell'utente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    #[serde(rename = "sin_relacion")]
    NoRelationship,
    #[serde(rename = "pendiente_enviada")]
    PendingOutgoing,
    #[serde(rename = "pendiente_recibida")]
    PendingIncoming,
    #[serde(rename = "conectados")]
    Connected,
}

impl InvitationStatus {
    /// Deriva lo stato dall'arco (eventuale) tra `viewer` e l'altro utente.
    pub fn for_viewer(edge: Option<&Connection>, viewer: i64) -> Self {
        match edge {
            None => InvitationStatus::NoRelationship,
            Some(c) if c.state == ConnectionState::Accepted => InvitationStatus::Connected,
            Some(c) if c.requester_id == viewer => InvitationStatus::PendingOutgoing,
            Some(_) => InvitationStatus::PendingIncoming,
        }
    }
}
