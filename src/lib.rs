//! Spraay Gateway - Realtime spray broadcast fan-out.
//!
//! Clients connect over WebSocket, join a room keyed by their user id, and
//! receive tagged "spray" (monetary gift) broadcasts addressed to the room
//! named by the originating event.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
