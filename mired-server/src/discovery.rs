//! Scoperta di agenti fuori dalla rete dell'utente.

use std::collections::HashSet;

use mired_core::{ConnectionState, RatingSummary, UserProfile};

use crate::directory::UserDirectory;
use crate::error::NetworkError;
use crate::invitations::InvitationWorkflow;
use crate::ratings::RatingAggregator;
use crate::store::ConnectionStore;

/// Quali archi escludono un candidato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryScope {
    /// Solo i contatti accettati. Gli invitati in attesa restano visibili con `already_invited`.
    #[default]
    ConnectedOnly,
    /// Qualunque arco, pendente in entrambe le direzioni o accettato.
    AnyEdge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub user: UserProfile,
    pub rating: RatingSummary,
    pub already_invited: bool,
}

#[derive(Clone)]
pub struct DiscoveryEngine {
    store: ConnectionStore,
    directory: UserDirectory,
    workflow: InvitationWorkflow,
    ratings: RatingAggregator,
    scope: DiscoveryScope,
}

impl DiscoveryEngine {
    pub fn new(
        store: ConnectionStore,
        directory: UserDirectory,
        workflow: InvitationWorkflow,
        ratings: RatingAggregator,
    ) -> Self {
        Self { store, directory, workflow, ratings, scope: DiscoveryScope::default() }
    }

    pub fn with_scope(mut self, scope: DiscoveryScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> DiscoveryScope {
        self.scope
    }

    /// Candidati per `user`, in ordine di (nome, cognome).
    pub async fn discover(&self, user: i64, search: Option<&str>) -> Result<Vec<Candidate>, NetworkError> {
        let excluded = self.excluded(user).await?;
        let invited = self.workflow.pending_outgoing(user).await?;
        let pool = self.directory.search(search).await?;

        let pool: Vec<UserProfile> = pool.into_iter().filter(|p| !excluded.contains(&p.id)).collect();
        let ids: Vec<i64> = pool.iter().map(|p| p.id).collect();
        let ratings = self.ratings.aggregate_many(&ids).await?;

        Ok(pool
            .into_iter()
            .map(|user| Candidate {
                rating: RatingAggregator::summary_of(&ratings, user.id),
                already_invited: invited.contains(&user.id),
                user,
            })
            .collect())
    }

    async fn excluded(&self, user: i64) -> Result<HashSet<i64>, NetworkError> {
        let mut excluded = HashSet::from([user]);
        for edge in self.store.edges_of(user).await? {
            let hides = match self.scope {
                DiscoveryScope::ConnectedOnly => edge.state == ConnectionState::Accepted,
                DiscoveryScope::AnyEdge => true,
            };
            if hides {
                excluded.extend(edge.peer_of(user));
            }
        }
        Ok(excluded)
    }
}
