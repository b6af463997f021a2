//! In-process room registry for spray fan-out.
//!
//! Rooms are keyed by an opaque string id: a connection joins the room named
//! by its user id, and sprays are broadcast to the room named by their event
//! id. Both live in one namespace.
//!
//! ```text
//! Room: alice          Room: event-42
//! ├── client-a         ├── client-d
//! ├── client-b         └── client-e
//! └── client-c
//! ```
//!
//! Each room is a `tokio::sync::broadcast` channel. Delivery is lossy by
//! design: a consumer that falls further behind than the channel capacity
//! misses messages, which matches the gateway's at-most-once contract.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::RoomId;
use crate::domain::spray::TaggedSprayMessage;
use crate::ports::{ClientId, RoomRegistry};

/// In-memory implementation of [`RoomRegistry`].
///
/// # Thread Safety
///
/// Uses `RwLock` for the room table since broadcasts (reads) vastly
/// outnumber joins/leaves (writes). This allows concurrent broadcasts
/// to different rooms.
pub struct RoomManager {
    /// Map of room id → broadcast sender for that room.
    rooms: RwLock<HashMap<RoomId, broadcast::Sender<TaggedSprayMessage>>>,

    /// Map of client id → room id for O(1) cleanup on disconnect.
    client_rooms: RwLock<HashMap<ClientId, RoomId>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with the given per-room channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_rooms: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Get all active room ids (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<RoomId> {
        self.rooms.read().await.keys().cloned().collect()
    }

    /// Get total count of connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_rooms.read().await.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl RoomRegistry for RoomManager {
    async fn join(
        &self,
        room: &RoomId,
        client_id: ClientId,
    ) -> broadcast::Receiver<TaggedSprayMessage> {
        // Subscribe while the room table is locked so the new receiver is
        // visible to any concurrent empty-room check, then release the
        // table before touching the client table. Neither lock is ever
        // held while waiting on the other.
        let receiver = {
            let mut rooms = self.rooms.write().await;
            rooms
                .entry(room.clone())
                .or_insert_with(|| {
                    let (tx, _) = broadcast::channel(self.channel_capacity);
                    tx
                })
                .subscribe()
        };

        self.client_rooms
            .write()
            .await
            .insert(client_id, room.clone());

        receiver
    }

    async fn leave(&self, client_id: &ClientId) {
        let room = self.client_rooms.write().await.remove(client_id);

        if let Some(room) = room {
            // Drop the room once its last receiver is gone. The count is
            // checked under the write lock: a client may have subscribed
            // since this connection's receiver was dropped, and removing
            // the sender would orphan it.
            let mut rooms = self.rooms.write().await;
            if rooms.get(&room).map(|s| s.receiver_count()) == Some(0) {
                rooms.remove(&room);
            }
        }
    }

    async fn broadcast(&self, room: &RoomId, message: TaggedSprayMessage) {
        let rooms = self.rooms.read().await;

        if let Some(sender) = rooms.get(room) {
            // No receivers is not an error for a fire-and-forget fan-out.
            let _ = sender.send(message);
        }
    }

    async fn client_count(&self, room: &RoomId) -> usize {
        let rooms = self.rooms.read().await;
        rooms
            .get(room)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}
