//! Wire protocol for the spray gateway.
//!
//! JSON over WebSocket text frames, tagged by a `type` field:
//! - Client → Server: `sendSpray` carrying a spray payload.
//! - Server → Room: `newSpary` carrying the tagged payload. The topic name
//!   is a historical misspelling that deployed clients match on; it must
//!   not be corrected without a protocol version bump.
//! - Server → Sender: `error` when a payload is rejected.
//!
//! Any inbound frame whose `type` is not recognized is ignored.

use serde::{Deserialize, Serialize};

use crate::application::SprayError;
use crate::domain::foundation::Timestamp;
use crate::domain::spray::{SprayMessage, TaggedSprayMessage};

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Submit a spray for broadcast to its event room.
    #[serde(rename = "sendSpray")]
    SendSpray(SprayMessage),
}

/// All message types that can be sent to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A spray broadcast delivered to room members.
    #[serde(rename = "newSpary")]
    NewSpary(TaggedSprayMessage),

    /// A rejection sent back to the offending sender only.
    #[serde(rename = "error")]
    Error(ErrorMessage),
}

/// Error event sent to a sender whose payload was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorMessage {
    /// Build the wire form of a spray rejection.
    pub fn from_spray_error(err: &SprayError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }
}
