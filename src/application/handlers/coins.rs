//! Coin handlers - the master-gated ledger update and the read path.

use std::sync::Arc;

use crate::domain::coins::{CoinLedger, CoinUpdate};
use crate::domain::foundation::{ConnectionId, PlayerToken, SessionError};
use crate::ports::{Broadcaster, IdentityStore, RoomEvent};

/// Command carrying an inbound `update_coins` payload.
#[derive(Debug, Clone, Copy)]
pub struct UpdateCoinsCommand {
    pub token: PlayerToken,
    pub update: CoinUpdate,
}

/// Handler for ledger updates.
pub struct UpdateCoinsHandler {
    store: Arc<dyn IdentityStore>,
    ledger: Arc<CoinLedger>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl UpdateCoinsHandler {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        ledger: Arc<CoinLedger>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            store,
            ledger,
            broadcaster,
        }
    }

    /// Applies a clamped update and broadcasts the new totals.
    ///
    /// A non-master caller is turned away before any mutation. The caller
    /// keeps that failure invisible to the client - intentionally, so an
    /// unauthorized participant learns nothing about the room.
    pub async fn handle(&self, cmd: UpdateCoinsCommand) -> Result<(), SessionError> {
        let record = self
            .store
            .get(&cmd.token)
            .await
            .ok_or(SessionError::Unauthorized)?;

        if !record.is_master() {
            return Err(SessionError::PermissionDenied);
        }

        let totals = self.ledger.apply(cmd.update);
        tracing::debug!(hope = totals.hope, despair = totals.despair, "coins updated");
        self.broadcaster
            .broadcast(RoomEvent::CoinsUpdated(totals))
            .await;
        Ok(())
    }
}

/// Command carrying an inbound `request_coins` message.
#[derive(Debug, Clone, Copy)]
pub struct RequestCoinsCommand {
    pub connection_id: ConnectionId,
}

/// Handler answering a single client's coin query.
pub struct RequestCoinsHandler {
    ledger: Arc<CoinLedger>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl RequestCoinsHandler {
    pub fn new(ledger: Arc<CoinLedger>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            ledger,
            broadcaster,
        }
    }

    /// Unicasts the current totals back to the requesting connection.
    ///
    /// Any connected identity may ask; reading leaks nothing writable.
    pub async fn handle(&self, cmd: RequestCoinsCommand) {
        self.broadcaster
            .unicast(
                &cmd.connection_id,
                RoomEvent::CoinsUpdated(self.ledger.totals()),
            )
            .await;
    }
}
