//! Application layer - Gateway use cases.

mod broadcaster;

pub use broadcaster::{SprayBroadcaster, SprayError};
