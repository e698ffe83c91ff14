//! Utility helpers: math extensions, the body arena, logging and tick profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, BodyHandle};
pub use math::*;
pub use profiling::TickProfile;
