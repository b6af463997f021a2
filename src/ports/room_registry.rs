//! RoomRegistry port - Interface for broadcast room membership.
//!
//! The gateway core never talks to a concrete pub/sub mechanism directly.
//! Room membership and fan-out sit behind this trait so the broadcaster can
//! be exercised against any registry implementation, and so a future
//! multi-server deployment can swap the in-process registry for a shared
//! one without touching the core.

use async_trait::async_trait;
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::foundation::RoomId;
use crate::domain::spray::TaggedSprayMessage;

/// Unique identifier for a live gateway connection.
///
/// Generated server-side when a client connects; never derived from
/// client-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Port for room membership and spray fan-out.
///
/// Contract:
/// - A connection joins at most one room through this interface.
/// - `broadcast` is fire-and-forget, at-most-once: no retry, no delivery
///   tracking, no-op when the room has no members.
/// - `leave` releases membership; implementations clean up empty rooms.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Join a client to a room, creating the room on demand.
    ///
    /// Returns a receiver carrying every subsequent broadcast to that room.
    /// Dropping the receiver ends delivery to this client.
    async fn join(
        &self,
        room: &RoomId,
        client_id: ClientId,
    ) -> broadcast::Receiver<TaggedSprayMessage>;

    /// Remove a client from its room.
    async fn leave(&self, client_id: &ClientId);

    /// Fan a tagged spray out to every current member of a room.
    async fn broadcast(&self, room: &RoomId, message: TaggedSprayMessage);

    /// Number of clients currently in a room (0 if the room doesn't exist).
    async fn client_count(&self, room: &RoomId) -> usize;
}
