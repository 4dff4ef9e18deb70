//! In-memory broadcaster for testing.
//!
//! Captures every event instead of delivering it to sockets, so tests can
//! assert exactly what a room full of clients would have seen.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned. Production code uses
//! the websocket connection registry.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::ConnectionId;
use crate::ports::{Broadcaster, RoomEvent};

/// Capturing broadcaster.
///
/// # Example
///
/// ```ignore
/// let broadcaster = Arc::new(InMemoryBroadcaster::new());
/// handler.handle(cmd).await?;
/// assert_eq!(broadcaster.broadcasts_of("update_players").len(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryBroadcaster {
    broadcasts: RwLock<Vec<RoomEvent>>,
    unicasts: RwLock<Vec<(ConnectionId, RoomEvent)>>,
}

impl InMemoryBroadcaster {
    /// Creates a new empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// All broadcast events, in trigger order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn broadcasts(&self) -> Vec<RoomEvent> {
        self.broadcasts
            .read()
            .expect("InMemoryBroadcaster: broadcasts lock poisoned")
            .clone()
    }

    /// Broadcast events with the given wire name.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn broadcasts_of(&self, name: &str) -> Vec<RoomEvent> {
        self.broadcasts()
            .into_iter()
            .filter(|e| e.name() == name)
            .collect()
    }

    /// All unicast events with their target connection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn unicasts(&self) -> Vec<(ConnectionId, RoomEvent)> {
        self.unicasts
            .read()
            .expect("InMemoryBroadcaster: unicasts lock poisoned")
            .clone()
    }

    /// Count of broadcast events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn broadcast_count(&self) -> usize {
        self.broadcasts
            .read()
            .expect("InMemoryBroadcaster: broadcasts lock poisoned")
            .len()
    }

    /// Clears all captured events (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.broadcasts
            .write()
            .expect("InMemoryBroadcaster: broadcasts write lock poisoned")
            .clear();
        self.unicasts
            .write()
            .expect("InMemoryBroadcaster: unicasts write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    async fn broadcast(&self, event: RoomEvent) {
        self.broadcasts
            .write()
            .expect("InMemoryBroadcaster: broadcasts write lock poisoned")
            .push(event);
    }

    async fn unicast(&self, connection_id: &ConnectionId, event: RoomEvent) {
        self.unicasts
            .write()
            .expect("InMemoryBroadcaster: unicasts write lock poisoned")
            .push((*connection_id, event));
    }
}
