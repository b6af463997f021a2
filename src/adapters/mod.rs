//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the gateway core to the outside world:
//! - `websocket` - Connection handling, wire protocol, and room registry

pub mod websocket;

pub use websocket::{GatewayState, RoomManager};
