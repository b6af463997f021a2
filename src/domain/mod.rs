//! Domain layer - value objects and core rules of the realtime gateway.

pub mod foundation;
pub mod spray;
