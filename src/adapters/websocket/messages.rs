//! WebSocket message types for the room protocol.
//!
//! Defines the protocol between server and connected clients:
//! - Client → Server: character updates, dice rolls, coin updates/queries
//! - Server → Client: roster snapshots, coin totals, roll results

use serde::{Deserialize, Serialize};

use crate::domain::character::{PlayerSnapshot, StatPatch};
use crate::domain::coins::CoinUpdate;
use crate::domain::dice::{RollRequest, RollResult};
use crate::domain::foundation::Timestamp;
use crate::ports::RoomEvent;

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
///
/// Payload fields outside the allow-lists are dropped during
/// deserialization; a whole frame that fails to parse is dropped by the
/// socket loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Allow-listed character stat changes.
    UpdateCharacter(StatPatch),

    /// A roll request for the acting identity's branch.
    RollDice(RollRequest),

    /// Master-only ledger update.
    UpdateCoins(CoinUpdate),

    /// Ask for the current coin totals (answered by unicast).
    RequestCoins,
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Roster of connected players changed.
    UpdatePlayers {
        players: Vec<PlayerSnapshot>,
        timestamp: String,
    },

    /// Coin totals changed (or were requested).
    UpdateCoins {
        hope: i64,
        despair: i64,
        timestamp: String,
    },

    /// Somebody rolled; the nested payload carries its own yellow/player tag.
    DiceRolled {
        roll: RollResult,
        timestamp: String,
    },
}

impl From<RoomEvent> for ServerMessage {
    fn from(event: RoomEvent) -> Self {
        let timestamp = Timestamp::now().to_rfc3339();
        match event {
            RoomEvent::PlayersUpdated(players) => ServerMessage::UpdatePlayers {
                players,
                timestamp,
            },
            RoomEvent::CoinsUpdated(totals) => ServerMessage::UpdateCoins {
                hope: totals.hope,
                despair: totals.despair,
                timestamp,
            },
            RoomEvent::DiceRolled(roll) => ServerMessage::DiceRolled { roll, timestamp },
        }
    }
}
