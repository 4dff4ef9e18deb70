//! Live connection registry with explicit fan-out.
//!
//! Every live socket registers an outbound queue here; broadcasting walks
//! the registered set and pushes the message onto each queue. Delivery is
//! best-effort: a queue that is gone (socket closing) or full (client too
//! slow) is skipped - that client simply misses the update.
//!
//! # Thread Safety
//!
//! Uses `RwLock` for the registry since broadcasts (reads) vastly outnumber
//! connects/disconnects (writes).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::domain::foundation::ConnectionId;
use crate::ports::{Broadcaster, RoomEvent};

use super::messages::ServerMessage;

/// Registry of every currently live endpoint.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, mpsc::Sender<ServerMessage>>>,

    /// Buffer size for each connection's outbound queue.
    channel_capacity: usize,
}

impl ConnectionRegistry {
    /// Create a new registry with the specified per-connection queue
    /// capacity. Larger values handle bursts better but use more memory.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Register a live endpoint and hand back its outbound queue.
    pub async fn register(&self, connection_id: ConnectionId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.connections.write().await.insert(connection_id, tx);
        rx
    }

    /// Remove an endpoint. Unknown ids are a no-op.
    pub async fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.write().await.remove(connection_id);
    }

    /// Count of currently registered endpoints.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl Broadcaster for ConnectionRegistry {
    async fn broadcast(&self, event: RoomEvent) {
        let name = event.name();
        let message = ServerMessage::from(event);
        let connections = self.connections.read().await;
        for (connection_id, tx) in connections.iter() {
            if tx.try_send(message.clone()).is_err() {
                tracing::trace!(
                    %connection_id,
                    event = name,
                    "endpoint gone or backed up, skipping"
                );
            }
        }
    }

    async fn unicast(&self, connection_id: &ConnectionId, event: RoomEvent) {
        let name = event.name();
        let connections = self.connections.read().await;
        if let Some(tx) = connections.get(connection_id) {
            if tx.try_send(ServerMessage::from(event)).is_err() {
                tracing::trace!(%connection_id, event = name, "unicast endpoint gone");
            }
        }
    }
}
