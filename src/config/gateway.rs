//! Realtime gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning knobs for room fan-out and per-connection buffering
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Buffer size for each room's broadcast channel. Larger values handle
    /// spray bursts better but use more memory; slow clients miss messages
    /// once the buffer overflows.
    #[serde(default = "default_room_channel_capacity")]
    pub room_channel_capacity: usize,

    /// Outbound queue depth per connection.
    #[serde(default = "default_send_buffer")]
    pub send_buffer: usize,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        if self.send_buffer == 0 {
            return Err(ValidationError::InvalidSendBuffer);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            room_channel_capacity: default_room_channel_capacity(),
            send_buffer: default_send_buffer(),
        }
    }
}

fn default_room_channel_capacity() -> usize {
    128
}

fn default_send_buffer() -> usize {
    32
}
