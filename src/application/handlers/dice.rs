//! RollDiceHandler - rolls for the acting identity and fans out the result.

use std::sync::Arc;

use crate::domain::dice::{DiceEngine, RollRequest};
use crate::domain::foundation::{PlayerToken, SessionError};
use crate::ports::{Broadcaster, IdentityStore, RoomEvent};

/// Command carrying an inbound `roll_dice` payload.
#[derive(Debug, Clone, Copy)]
pub struct RollDiceCommand {
    pub token: PlayerToken,
    pub request: RollRequest,
}

/// Handler for dice rolls.
pub struct RollDiceHandler {
    store: Arc<dyn IdentityStore>,
    broadcaster: Arc<dyn Broadcaster>,
    engine: Arc<DiceEngine>,
}

impl RollDiceHandler {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        broadcaster: Arc<dyn Broadcaster>,
        engine: Arc<DiceEngine>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            engine,
        }
    }

    /// Rolls and broadcasts the tagged result to the whole room.
    ///
    /// Every successful roll broadcasts unconditionally; no roll history is
    /// kept anywhere.
    pub async fn handle(&self, cmd: RollDiceCommand) -> Result<(), SessionError> {
        let record = self
            .store
            .get(&cmd.token)
            .await
            .ok_or(SessionError::Unauthorized)?;

        let result = self.engine.roll(&record, cmd.request);
        tracing::debug!(master = record.is_master(), "dice rolled");
        self.broadcaster
            .broadcast(RoomEvent::DiceRolled(result))
            .await;
        Ok(())
    }
}
