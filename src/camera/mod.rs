//! Camera state: projection math, the interactive orbit controller, and
//! the convergence rig that overpowers it after each asset swap.

pub mod controller;
pub mod core;
pub mod rig;

pub use controller::OrbitController;
pub use rig::{CameraRig, ConvergenceState, CONVERGENCE_FRAMES};
pub use self::core::{Camera, CameraUniform};
