//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway core and the outside world. Adapters implement these ports.
//!
//! - `RoomRegistry` - Room membership and spray fan-out

mod room_registry;

pub use room_registry::{ClientId, RoomRegistry};
