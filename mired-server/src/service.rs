use mired_core::{
    Agente, AgentesResponse, ConexionResponse, Contacto, ContactosResponse, EstadoResponse,
    Invitacion, InvitacionesResponse,
};
use sqlx::SqlitePool;

use crate::directory::UserDirectory;
use crate::discovery::{DiscoveryEngine, DiscoveryScope};
use crate::error::NetworkError;
use crate::invitations::InvitationWorkflow;
use crate::ratings::RatingAggregator;
use crate::store::ConnectionStore;

/// Punto d'ingresso degli handler: compone i componenti della rete
/// e costruisce le risposte nel formato atteso dai client.
#[derive(Clone)]
pub struct MiredService {
    store: ConnectionStore,
    workflow: InvitationWorkflow,
    discovery: DiscoveryEngine,
    ratings: RatingAggregator,
}

impl MiredService {
    pub fn new(pool: SqlitePool) -> Self {
        let store = ConnectionStore::new(pool.clone());
        let directory = UserDirectory::new(pool.clone());
        let ratings = RatingAggregator::new(pool);
        let workflow = InvitationWorkflow::new(store.clone());
        let discovery =
            DiscoveryEngine::new(store.clone(), directory, workflow.clone(), ratings.clone());
        Self { store, workflow, discovery, ratings }
    }

    pub fn with_discovery_scope(mut self, scope: DiscoveryScope) -> Self {
        self.discovery = self.discovery.with_scope(scope);
        self
    }

    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub fn workflow(&self) -> &InvitationWorkflow {
        &self.workflow
    }

    pub fn discovery(&self) -> &DiscoveryEngine {
        &self.discovery
    }

    pub fn ratings(&self) -> &RatingAggregator {
        &self.ratings
    }

    pub async fn contactos(&self, user_id: i64) -> Result<ContactosResponse, NetworkError> {
        let peers = self.store.list_accepted(user_id).await?;
        let ids: Vec<i64> = peers.iter().map(|p| p.user.id).collect();
        let ratings = self.ratings.aggregate_many(&ids).await?;
        let contactos: Vec<Contacto> = peers
            .into_iter()
            .map(|peer| {
                let calificacion = RatingAggregator::summary_of(&ratings, peer.user.id);
                Contacto::new(&peer.user, peer.connected_at, calificacion)
            })
            .collect();
        tracing::debug!(user_id, total = contactos.len(), "contactos");
        Ok(ContactosResponse { success: true, contactos })
    }

    pub async fn agentes(&self, user_id: i64, busqueda: Option<&str>) -> Result<AgentesResponse, NetworkError> {
        let agentes: Vec<Agente> = self
            .discovery
            .discover(user_id, busqueda)
            .await?
            .iter()
            .map(|c| Agente::new(&c.user, c.rating, c.already_invited))
            .collect();
        tracing::debug!(user_id, busqueda = ?busqueda, total = agentes.len(), "agentes");
        Ok(AgentesResponse { success: true, agentes })
    }

    pub async fn invitaciones(&self, user_id: i64) -> Result<InvitacionesResponse, NetworkError> {
        let invitaciones: Vec<Invitacion> = self
            .store
            .list_pending_incoming(user_id)
            .await?
            .iter()
            .map(|inv| Invitacion::new(&inv.edge, &inv.requester))
            .collect();
        tracing::debug!(user_id, total = invitaciones.len(), "invitaciones");
        Ok(InvitacionesResponse { success: true, invitaciones })
    }

    pub async fn invitar(&self, user_id: i64, destinatario_id: i64) -> Result<ConexionResponse, NetworkError> {
        let edge = self.workflow.invite(user_id, destinatario_id).await?;
        Ok(ConexionResponse { success: true, conexion: edge.into() })
    }

    pub async fn aceptar(&self, user_id: i64, remitente_id: i64) -> Result<ConexionResponse, NetworkError> {
        let edge = self.workflow.accept(user_id, remitente_id).await?;
        Ok(ConexionResponse { success: true, conexion: edge.into() })
    }

    pub async fn estado(&self, user_id: i64, otro_id: i64) -> Result<EstadoResponse, NetworkError> {
        let estado = self.workflow.status(user_id, otro_id).await?;
        Ok(EstadoResponse { success: true, estado })
    }
}
