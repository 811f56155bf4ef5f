//! Grafo delle connessioni (tabella `mired`).
//!
//! `id_comprador` è chi ha inviato l'invito, `id_vendedor` chi lo riceve.
//! Il vincolo "un arco per coppia" è garantito dall'indice univoco `mired_coppia`,
//! quindi due inviti concorrenti sulla stessa coppia non possono riuscire entrambi.

use mired_core::{now_timestamp, Connection, ConnectionState, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::directory::profile_from_row;
use crate::error::NetworkError;

const EDGE_COLUMNS: &str = "m.id, m.id_comprador, m.id_vendedor, m.estado, m.fecha";

/// Utente collegato tramite un arco accettato, con la data dell'arco.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPeer {
    pub user: UserProfile,
    pub connected_at: String,
}

/// Invito pendente ricevuto, con il profilo del mittente.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingInvite {
    pub edge: Connection,
    pub requester: UserProfile,
}

#[derive(Clone)]
pub struct ConnectionStore {
    pool: SqlitePool,
}

impl ConnectionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ricerca simmetrica: trova l'arco qualunque sia il lato salvato come mittente.
    pub async fn find_edge(&self, user_a: i64, user_b: i64) -> Result<Option<Connection>, NetworkError> {
        let sql = format!(
            "SELECT {EDGE_COLUMNS} FROM mired m
             WHERE (m.id_comprador = ? AND m.id_vendedor = ?)
                OR (m.id_comprador = ? AND m.id_vendedor = ?)"
        );
        let row = sqlx::query(&sql)
            .bind(user_a)
            .bind(user_b)
            .bind(user_b)
            .bind(user_a)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(connection_from_row).transpose()
    }

    /// Inserisce un nuovo arco Pending con `requester` come mittente.
    /// L'unicità è demandata all'indice: niente check-then-insert applicativo.
    pub async fn create_invite(&self, requester: i64, recipient: i64) -> Result<Connection, NetworkError> {
        if requester == recipient {
            return Err(NetworkError::SelfInvite);
        }
        let created_at = now_timestamp()?;
        let row = sqlx::query(
            "INSERT INTO mired (id_comprador, id_vendedor, estado, fecha) VALUES (?, ?, ?, ?)
             RETURNING id, id_comprador, id_vendedor, estado, fecha",
        )
        .bind(requester)
        .bind(recipient)
        .bind(ConnectionState::Pending.estado())
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| NetworkError::from_insert(e, requester, recipient))?;
        connection_from_row(&row)
    }

    /// Transizione Pending -> Accepted, solo se l'arco ha esattamente la direzione requester -> recipient.
    /// È un UPDATE condizionale: un secondo accept concorrente non trova più righe e fallisce con NotFound.
    pub async fn accept_invite(&self, recipient: i64, requester: i64) -> Result<Connection, NetworkError> {
        let row = sqlx::query(
            "UPDATE mired SET estado = ?
             WHERE id_comprador = ? AND id_vendedor = ? AND estado = ?
             RETURNING id, id_comprador, id_vendedor, estado, fecha",
        )
        .bind(ConnectionState::Accepted.estado())
        .bind(requester)
        .bind(recipient)
        .bind(ConnectionState::Pending.estado())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => connection_from_row(&row),
            None => Err(NetworkError::NotFound),
        }
    }

    /// Tutti gli archi (in qualunque stato) incidenti a `user`.
    pub async fn edges_of(&self, user: i64) -> Result<Vec<Connection>, NetworkError> {
        let sql = format!(
            "SELECT {EDGE_COLUMNS} FROM mired m
             WHERE m.id_comprador = ? OR m.id_vendedor = ?
             ORDER BY m.fecha DESC, m.id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(user)
            .bind(user)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(connection_from_row).collect()
    }

    /// Utenti della rete di `user` (archi accettati), dal più recente.
    pub async fn list_accepted(&self, user: i64) -> Result<Vec<NetworkPeer>, NetworkError> {
        let rows = sqlx::query(
            "SELECT u.user_id, u.firstname, u.lastname, u.telefono_contacto, u.direccion,
                    u.user_email, u.img_url, m.fecha
             FROM mired m
             JOIN users u ON (
                 (m.id_comprador = ? AND u.user_id = m.id_vendedor)
                 OR
                 (m.id_vendedor = ? AND u.user_id = m.id_comprador)
             )
             WHERE m.estado = ?
             ORDER BY m.fecha DESC, m.id DESC",
        )
        .bind(user)
        .bind(user)
        .bind(ConnectionState::Accepted.estado())
        .fetch_all(&self.pool)
        .await?;

        let mut peers = Vec::with_capacity(rows.len());
        for row in &rows {
            peers.push(NetworkPeer {
                user: profile_from_row(row)?,
                connected_at: row.try_get("fecha")?,
            });
        }
        Ok(peers)
    }

    /// Inviti pendenti in cui `user` è il destinatario, dal più recente.
    pub async fn list_pending_incoming(&self, user: i64) -> Result<Vec<IncomingInvite>, NetworkError> {
        let sql = format!(
            "SELECT {EDGE_COLUMNS}, u.user_id, u.firstname, u.lastname, u.telefono_contacto,
                    u.direccion, u.user_email, u.img_url
             FROM mired m
             JOIN users u ON m.id_comprador = u.user_id
             WHERE m.id_vendedor = ? AND m.estado = ?
             ORDER BY m.fecha DESC, m.id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(user)
            .bind(ConnectionState::Pending.estado())
            .fetch_all(&self.pool)
            .await?;

        let mut invites = Vec::with_capacity(rows.len());
        for row in &rows {
            invites.push(IncomingInvite {
                edge: connection_from_row(row)?,
                requester: profile_from_row(row)?,
            });
        }
        Ok(invites)
    }
}

fn connection_from_row(row: &SqliteRow) -> Result<Connection, NetworkError> {
    let estado: i64 = row.try_get("estado")?;
    let state = ConnectionState::from_estado(estado).ok_or(NetworkError::CorruptState(estado))?;
    Ok(Connection {
        id: row.try_get("id")?,
        requester_id: row.try_get("id_comprador")?,
        recipient_id: row.try_get("id_vendedor")?,
        state,
        created_at: row.try_get("fecha")?,
    })
}
