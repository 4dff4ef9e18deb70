//! In-memory identity store.
//!
//! The registry of issued tokens lives in process memory only - persistence
//! across restart is an explicit non-goal. One `RwLock` guards all records,
//! giving the single mutual-exclusion domain the session semantics assume:
//! two interleaved messages for the same token cannot lose updates.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::character::{CharacterRecord, PlayerSnapshot, StatPatch};
use crate::domain::foundation::{ConnectionId, PlayerToken};
use crate::ports::IdentityStore;

#[derive(Default)]
struct Records {
    by_token: HashMap<PlayerToken, CharacterRecord>,
    /// Token insertion order, the order the roster is reported in.
    order: Vec<PlayerToken>,
}

/// Process-lifetime identity registry.
///
/// Registered-but-never-connected tokens stay here indefinitely; that leak
/// is accepted at process scope.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    records: RwLock<Records>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered tokens (connected or not).
    pub async fn len(&self) -> usize {
        self.records.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn insert(&self, record: CharacterRecord) {
        let mut records = self.records.write().await;
        let token = *record.token();
        if records.by_token.insert(token, record).is_none() {
            records.order.push(token);
        }
    }

    async fn get(&self, token: &PlayerToken) -> Option<CharacterRecord> {
        self.records.read().await.by_token.get(token).cloned()
    }

    async fn update_stats(
        &self,
        token: &PlayerToken,
        patch: StatPatch,
    ) -> Option<CharacterRecord> {
        let mut records = self.records.write().await;
        let record = records.by_token.get_mut(token)?;
        record.apply(patch);
        Some(record.clone())
    }

    async fn mark_connected(&self, token: &PlayerToken, connection_id: ConnectionId) -> bool {
        let mut records = self.records.write().await;
        match records.by_token.get_mut(token) {
            Some(record) => {
                record.mark_connected(connection_id);
                true
            }
            None => false,
        }
    }

    async fn mark_disconnected(&self, connection_id: &ConnectionId) -> Option<PlayerToken> {
        let mut records = self.records.write().await;
        let record = records
            .by_token
            .values_mut()
            .find(|r| r.connection_id() == Some(*connection_id))?;
        record.mark_disconnected();
        Some(*record.token())
    }

    async fn all(&self) -> Vec<CharacterRecord> {
        let records = self.records.read().await;
        records
            .order
            .iter()
            .filter_map(|token| records.by_token.get(token).cloned())
            .collect()
    }

    async fn roster(&self) -> Vec<PlayerSnapshot> {
        let records = self.records.read().await;
        records
            .order
            .iter()
            .filter_map(|token| records.by_token.get(token))
            .filter(|record| record.in_game() && !record.is_master())
            .map(|record| record.snapshot())
            .collect()
    }
}
