//! Connect/disconnect handlers - the presence side of the session registry.

use std::sync::Arc;

use crate::domain::character::PlayerSnapshot;
use crate::domain::coins::CoinLedger;
use crate::domain::foundation::{ConnectionId, PlayerToken, SessionError};
use crate::ports::{Broadcaster, IdentityStore, RoomEvent};

/// Command issued when a socket finishes its handshake.
#[derive(Debug, Clone, Copy)]
pub struct ConnectCommand {
    pub token: PlayerToken,
    pub connection_id: ConnectionId,
}

/// Handler for new connections.
pub struct ConnectHandler {
    store: Arc<dyn IdentityStore>,
    broadcaster: Arc<dyn Broadcaster>,
    ledger: Arc<CoinLedger>,
}

impl ConnectHandler {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        broadcaster: Arc<dyn Broadcaster>,
        ledger: Arc<CoinLedger>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            ledger,
        }
    }

    /// Marks the token present and announces the new roster.
    ///
    /// An unknown token is rejected before any state changes. A token that
    /// is already in game simply gets its connection id overwritten - last
    /// writer wins. The master additionally receives the current coin
    /// totals on their fresh connection.
    pub async fn handle(&self, cmd: ConnectCommand) -> Result<Vec<PlayerSnapshot>, SessionError> {
        let record = self
            .store
            .get(&cmd.token)
            .await
            .ok_or(SessionError::Unauthorized)?;

        if !self
            .store
            .mark_connected(&cmd.token, cmd.connection_id)
            .await
        {
            return Err(SessionError::Unauthorized);
        }

        let roster = self.store.roster().await;
        self.broadcaster
            .broadcast(RoomEvent::PlayersUpdated(roster.clone()))
            .await;

        if record.is_master() {
            self.broadcaster
                .unicast(
                    &cmd.connection_id,
                    RoomEvent::CoinsUpdated(self.ledger.totals()),
                )
                .await;
        }

        tracing::info!(
            connection_id = %cmd.connection_id,
            master = record.is_master(),
            players = roster.len(),
            "participant connected"
        );
        Ok(roster)
    }
}

/// Command issued when a socket closes.
#[derive(Debug, Clone, Copy)]
pub struct DisconnectCommand {
    pub connection_id: ConnectionId,
}

/// Handler for closed connections.
pub struct DisconnectHandler {
    store: Arc<dyn IdentityStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl DisconnectHandler {
    pub fn new(store: Arc<dyn IdentityStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// Clears presence for the owning token and announces the new roster.
    ///
    /// Idempotent: an unknown connection id - including one superseded by a
    /// reconnect - changes nothing and broadcasts nothing.
    pub async fn handle(&self, cmd: DisconnectCommand) {
        match self.store.mark_disconnected(&cmd.connection_id).await {
            Some(_) => {
                let roster = self.store.roster().await;
                tracing::info!(
                    connection_id = %cmd.connection_id,
                    players = roster.len(),
                    "participant disconnected"
                );
                self.broadcaster
                    .broadcast(RoomEvent::PlayersUpdated(roster))
                    .await;
            }
            None => {
                tracing::debug!(
                    connection_id = %cmd.connection_id,
                    "disconnect for unknown connection ignored"
                );
            }
        }
    }
}
