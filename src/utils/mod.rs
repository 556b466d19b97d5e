//! Utility helpers: node arena, math extensions, logging.

pub mod allocator;
pub mod logging;
pub mod math;

pub use allocator::{NodeArena, NodeId};
pub use math::*;
