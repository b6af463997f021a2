//! Spray domain - payloads and tagging for realtime gift broadcasts.

pub mod auto_id;
mod amount;
mod message;

pub use amount::SprayAmount;
pub use message::{SprayMessage, TaggedSprayMessage};
