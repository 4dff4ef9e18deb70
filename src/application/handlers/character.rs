//! UpdateStatsHandler - the allow-listed character mutation path.

use std::sync::Arc;

use crate::domain::character::StatPatch;
use crate::domain::foundation::{PlayerToken, SessionError};
use crate::ports::{Broadcaster, IdentityStore, RoomEvent};

/// Command carrying an inbound `update_character` payload.
#[derive(Debug, Clone, Copy)]
pub struct UpdateStatsCommand {
    pub token: PlayerToken,
    pub patch: StatPatch,
}

/// Handler for character stat updates.
pub struct UpdateStatsHandler {
    store: Arc<dyn IdentityStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl UpdateStatsHandler {
    pub fn new(store: Arc<dyn IdentityStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// Applies the patch and announces the refreshed roster.
    ///
    /// Only the allow-listed stats can change; anything else in the inbound
    /// payload was already dropped during deserialization. An unknown token
    /// fails before any mutation, and the caller keeps the failure invisible
    /// to the client.
    pub async fn handle(&self, cmd: UpdateStatsCommand) -> Result<(), SessionError> {
        let updated = self
            .store
            .update_stats(&cmd.token, cmd.patch)
            .await
            .ok_or(SessionError::Unauthorized)?;

        tracing::debug!(
            madness = updated.madness(),
            discipline = updated.discipline(),
            exhaustion = updated.exhaustion(),
            "character stats updated"
        );

        let roster = self.store.roster().await;
        self.broadcaster
            .broadcast(RoomEvent::PlayersUpdated(roster))
            .await;
        Ok(())
    }
}
