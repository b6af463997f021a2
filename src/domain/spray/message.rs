//! Spray message payloads.
//!
//! A [`SprayMessage`] is what a client submits over the wire; a
//! [`TaggedSprayMessage`] is what room members receive after the gateway has
//! validated routing, normalized the amount, and attached a broadcast tag.
//! Tagged messages are transient: they exist only for the duration of the
//! fan-out and are never persisted here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RoomId, ValidationError};

use super::amount::SprayAmount;

/// Inbound spray payload, immutable once received.
///
/// Fields default to empty so that a structurally missing field and an
/// explicit empty string are treated the same way by [`validate`], instead
/// of failing opaquely during deserialization.
///
/// [`validate`]: SprayMessage::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprayMessage {
    /// User who initiated the gift. Informational, not used for routing.
    #[serde(default)]
    pub sender: String,

    /// User the gift is addressed to.
    #[serde(default)]
    pub receiver: String,

    /// Wallet owner the amount is drawn from.
    #[serde(default)]
    pub sprayer_id: String,

    /// Event whose room receives the broadcast.
    #[serde(default)]
    pub event_id: String,

    /// Gifted amount; may be fractional.
    #[serde(default)]
    pub amount: SprayAmount,
}

impl SprayMessage {
    /// Checks the fields required to route and account the spray.
    ///
    /// `receiver`, `sprayer_id`, and `event_id` must be non-empty; `amount`
    /// must be non-negative. Runs before any tag is generated so a rejected
    /// message causes no partial work.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.receiver.is_empty() {
            return Err(ValidationError::empty_field("receiver"));
        }
        if self.sprayer_id.is_empty() {
            return Err(ValidationError::empty_field("sprayerId"));
        }
        if self.event_id.is_empty() {
            return Err(ValidationError::empty_field("eventId"));
        }
        if self.amount.is_negative() {
            return Err(ValidationError::invalid_value(
                "amount",
                "must be non-negative",
            ));
        }
        Ok(())
    }

    /// Room the broadcast is addressed to.
    pub fn room(&self) -> RoomId {
        RoomId::new(self.event_id.clone())
    }

    /// Consumes the message into its broadcast form: amount normalized and
    /// the given tag attached.
    pub fn into_tagged(self, auto_id: String) -> TaggedSprayMessage {
        TaggedSprayMessage {
            sender: self.sender,
            receiver: self.receiver,
            sprayer_id: self.sprayer_id,
            event_id: self.event_id,
            amount: self.amount.normalized(),
            auto_id,
        }
    }
}

/// Broadcast form of a spray: all payload fields plus the generated tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedSprayMessage {
    pub sender: String,
    pub receiver: String,
    pub sprayer_id: String,
    pub event_id: String,
    pub amount: SprayAmount,
    pub auto_id: String,
}
