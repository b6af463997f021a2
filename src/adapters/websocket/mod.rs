//! WebSocket adapters for realtime spray fan-out.
//!
//! # Architecture
//!
//! ```text
//! client ──connect /ws?userId=alice──▶ handler ──join──▶ RoomManager
//! client ──{"type":"sendSpray",...}──▶ handler ──▶ SprayBroadcaster
//!                                                        │ tag + normalize
//!                                                        ▼
//!                                    room "eventId" ◀─broadcast─┘
//!                                        │
//!            {"type":"newSpary",...} ◀───┴──▶ every member connection
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types (`sendSpray`, `newSpary`, `error`)
//! - [`rooms`] - In-process room registry over broadcast channels
//! - [`handler`] - Axum WebSocket upgrade handler and connection lifecycle

pub mod handler;
pub mod messages;
pub mod rooms;

pub use handler::{gateway_router, ws_handler, ConnectParams, GatewayState};
pub use messages::{ClientMessage, ErrorMessage, ServerMessage};
pub use rooms::RoomManager;
