//! Small shared utilities: easing curves and frame timing.

pub mod easing;
pub mod frame_clock;
