//! Spray broadcast service.
//!
//! The single write path of the gateway: take an inbound spray payload,
//! validate its routing fields, attach a broadcast tag, normalize the
//! amount, and fan the result out to the room named by the originating
//! event. One broadcast per accepted payload, nothing persisted.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::spray::{auto_id, SprayMessage, TaggedSprayMessage};
use crate::ports::RoomRegistry;

/// Errors surfaced to the gateway boundary when a spray is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SprayError {
    /// Payload failed routing validation; nothing was broadcast.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SprayError {
    /// Machine-readable error code for the wire protocol.
    pub fn code(&self) -> &'static str {
        match self {
            SprayError::Validation(e) => e.code(),
        }
    }
}

/// Fans validated sprays out to event rooms.
pub struct SprayBroadcaster {
    rooms: Arc<dyn RoomRegistry>,
}

impl SprayBroadcaster {
    /// Create a broadcaster over the given room registry.
    pub fn new(rooms: Arc<dyn RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Handle one inbound spray.
    ///
    /// Validation runs before any tag is generated: a rejected payload
    /// causes no broadcast and no other side effect. On success exactly one
    /// fan-out is performed, fire-and-forget, and the tagged message is
    /// returned for logging.
    pub async fn handle_send(
        &self,
        payload: SprayMessage,
    ) -> Result<TaggedSprayMessage, SprayError> {
        payload.validate()?;

        let room = payload.room();
        let tagged = payload.into_tagged(auto_id::generate_tag());

        tracing::trace!(
            room = %room,
            auto_id = %tagged.auto_id,
            amount = %tagged.amount,
            "Broadcasting spray"
        );

        self.rooms.broadcast(&room, tagged.clone()).await;
        Ok(tagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::RoomManager;
    use crate::domain::foundation::RoomId;
    use crate::domain::spray::SprayAmount;
    use crate::ports::ClientId;

    fn broadcaster() -> (Arc<RoomManager>, SprayBroadcaster) {
        let rooms = Arc::new(RoomManager::with_default_capacity());
        let broadcaster = SprayBroadcaster::new(rooms.clone());
        (rooms, broadcaster)
    }

    fn valid_payload() -> SprayMessage {
        SprayMessage {
            sender: "bob".to_string(),
            receiver: "alice".to_string(),
            sprayer_id: "bob".to_string(),
            event_id: "event-1".to_string(),
            amount: SprayAmount::from_u64(10),
        }
    }

    #[tokio::test]
    async fn valid_payload_produces_one_tagged_broadcast() {
        let (rooms, broadcaster) = broadcaster();
        let room = RoomId::new("event-1");
        let mut rx = rooms.join(&room, ClientId::new()).await;

        let tagged = broadcaster.handle_send(valid_payload()).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received, tagged);

        // Exactly one delivery.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_tag_is_seven_alphanumeric_chars() {
        let (_rooms, broadcaster) = broadcaster();
        let tagged = broadcaster.handle_send(valid_payload()).await.unwrap();
        assert_eq!(tagged.auto_id.len(), 7);
        assert!(tagged.auto_id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn whole_float_amount_is_floored_in_broadcast() {
        let (rooms, broadcaster) = broadcaster();
        let room = RoomId::new("event-1");
        let mut rx = rooms.join(&room, ClientId::new()).await;

        let payload = SprayMessage {
            amount: serde_json::from_str("10.0").unwrap(),
            ..valid_payload()
        };
        broadcaster.handle_send(payload).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(serde_json::to_string(&received.amount).unwrap(), "10");
    }

    #[tokio::test]
    async fn fractional_amount_passes_through_unchanged() {
        let (_rooms, broadcaster) = broadcaster();
        let payload = SprayMessage {
            amount: serde_json::from_str("5.25").unwrap(),
            ..valid_payload()
        };
        let tagged = broadcaster.handle_send(payload).await.unwrap();
        assert_eq!(serde_json::to_string(&tagged.amount).unwrap(), "5.25");
    }

    #[tokio::test]
    async fn missing_routing_field_is_rejected_without_broadcast() {
        let (rooms, broadcaster) = broadcaster();
        let room = RoomId::new("event-1");
        let mut rx = rooms.join(&room, ClientId::new()).await;

        let payload = SprayMessage {
            receiver: String::new(),
            ..valid_payload()
        };
        let result = broadcaster.handle_send(payload).await;

        assert!(matches!(result, Err(SprayError::Validation(_))));
        assert!(rx.try_recv().is_err(), "rejected payload must not broadcast");
    }

    #[tokio::test]
    async fn each_of_the_required_fields_is_enforced() {
        let (_rooms, broadcaster) = broadcaster();

        for field in ["receiver", "sprayerId", "eventId"] {
            let mut payload = valid_payload();
            match field {
                "receiver" => payload.receiver.clear(),
                "sprayerId" => payload.sprayer_id.clear(),
                _ => payload.event_id.clear(),
            }
            let result = broadcaster.handle_send(payload).await;
            assert!(result.is_err(), "field {} should be required", field);
        }
    }

    #[tokio::test]
    async fn broadcast_to_empty_room_still_succeeds() {
        // Fire-and-forget: no members is not an error.
        let (_rooms, broadcaster) = broadcaster();
        assert!(broadcaster.handle_send(valid_payload()).await.is_ok());
    }

    #[tokio::test]
    async fn successive_broadcasts_carry_distinct_tags() {
        let (_rooms, broadcaster) = broadcaster();
        let a = broadcaster.handle_send(valid_payload()).await.unwrap();
        let b = broadcaster.handle_send(valid_payload()).await.unwrap();
        assert_ne!(a.auto_id, b.auto_id);
    }

    #[test]
    fn spray_error_exposes_validation_code() {
        let err = SprayError::from(ValidationError::empty_field("receiver"));
        assert_eq!(err.code(), "EMPTY_FIELD");
    }
}
