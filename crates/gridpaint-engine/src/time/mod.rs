//! Time subsystem.
//!
//! One `FrameClock` per window; call `tick()` once per presented frame to
//! obtain `FrameTime`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
