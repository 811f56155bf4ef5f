//! Ciclo di vita degli inviti: NoRelationship -> Pending -> Accepted.
//!
//! Non esistono transizioni di ritorno (rifiuto o rimozione di un contatto).

use std::collections::HashSet;

use mired_core::{Connection, ConnectionState, InvitationStatus};

use crate::error::NetworkError;
use crate::store::ConnectionStore;

#[derive(Clone)]
pub struct InvitationWorkflow {
    store: ConnectionStore,
}

impl InvitationWorkflow {
    pub fn new(store: ConnectionStore) -> Self {
        Self { store }
    }

    /// Stato della coppia visto da `viewer`.
    pub async fn status(&self, viewer: i64, other: i64) -> Result<InvitationStatus, NetworkError> {
        let edge = self.store.find_edge(viewer, other).await?;
        Ok(InvitationStatus::for_viewer(edge.as_ref(), viewer))
    }

    /// `from` invita `to`. Fallisce con Conflict se la coppia ha già un arco.
    pub async fn invite(&self, from: i64, to: i64) -> Result<Connection, NetworkError> {
        let edge = self.store.create_invite(from, to).await?;
        tracing::info!(from, to, id_mired = edge.id, "invitation created");
        Ok(edge)
    }

    /// `by` accetta l'invito ricevuto da `from`. Solo il destinatario può accettare.
    pub async fn accept(&self, by: i64, from: i64) -> Result<Connection, NetworkError> {
        let edge = self.store.accept_invite(by, from).await?;
        tracing::info!(by, from, id_mired = edge.id, "invitation accepted");
        Ok(edge)
    }

    /// Utenti a cui `user` ha inviato un invito ancora pendente.
    /// È l'unica fonte del flag `ya_invitado` della scoperta.
    pub async fn pending_outgoing(&self, user: i64) -> Result<HashSet<i64>, NetworkError> {
        let edges = self.store.edges_of(user).await?;
        Ok(edges
            .into_iter()
            .filter(|e| e.state == ConnectionState::Pending && e.requester_id == user)
            .map(|e| e.recipient_id)
            .collect())
    }
}
