//! IdentityStore port - registry of issued tokens and their records.

use async_trait::async_trait;

use crate::domain::character::{CharacterRecord, PlayerSnapshot, StatPatch};
use crate::domain::foundation::{ConnectionId, PlayerToken};

/// Registry of every identity issued since process start.
///
/// Records live for the remainder of the process; presence is the only
/// soft-deletable aspect. Implementations guard all records behind a single
/// mutual-exclusion domain so interleaved messages for the same token cannot
/// lose updates.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Stores a freshly registered record. Tokens are unique, so this never
    /// overwrites.
    async fn insert(&self, record: CharacterRecord);

    /// Looks up a record by token.
    async fn get(&self, token: &PlayerToken) -> Option<CharacterRecord>;

    /// Applies an allow-listed stat patch. Returns the updated record, or
    /// `None` when the token is unknown.
    async fn update_stats(
        &self,
        token: &PlayerToken,
        patch: StatPatch,
    ) -> Option<CharacterRecord>;

    /// Marks the token present under `connection_id`, overwriting any
    /// previous connection id (last writer wins). Returns `false` when the
    /// token is unknown.
    async fn mark_connected(&self, token: &PlayerToken, connection_id: ConnectionId) -> bool;

    /// Clears presence for whichever token currently owns `connection_id`.
    ///
    /// Idempotent: a stale or unknown connection id changes nothing and
    /// returns `None`. Returns the owning token when presence was cleared.
    async fn mark_disconnected(&self, connection_id: &ConnectionId) -> Option<PlayerToken>;

    /// Every record, in insertion order.
    async fn all(&self) -> Vec<CharacterRecord>;

    /// Insertion-ordered roster of connected, non-master players.
    async fn roster(&self) -> Vec<PlayerSnapshot>;
}
