//! Broadcaster port - fan-out of room events to live endpoints.

use async_trait::async_trait;

use crate::domain::character::PlayerSnapshot;
use crate::domain::coins::CoinTotals;
use crate::domain::dice::RollResult;
use crate::domain::foundation::ConnectionId;

/// An event pushed to connected clients.
///
/// The websocket adapter maps these onto the wire protocol; the in-memory
/// adapter captures them for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// The roster of connected players changed.
    PlayersUpdated(Vec<PlayerSnapshot>),
    /// The coin ledger changed (or was requested).
    CoinsUpdated(CoinTotals),
    /// Somebody rolled.
    DiceRolled(RollResult),
}

impl RoomEvent {
    /// Wire-level event name.
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::PlayersUpdated(_) => "update_players",
            RoomEvent::CoinsUpdated(_) => "update_coins",
            RoomEvent::DiceRolled(_) => "dice_rolled",
        }
    }
}

/// Delivery of room events to connected endpoints.
///
/// Both operations are best-effort and fire-and-forget: no acknowledgment,
/// no delivery guarantee to endpoints that disconnect mid-send, and no
/// ordering guarantee across event names beyond per-connection FIFO.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Delivers to every live endpoint.
    async fn broadcast(&self, event: RoomEvent);

    /// Delivers to exactly one endpoint; a no-op when the id is not live.
    async fn unicast(&self, connection_id: &ConnectionId, event: RoomEvent);
}
