//! Per-swap animation: the entrance scale/opacity state machine.

pub mod entrance;

pub use entrance::{EntranceAnimator, EntrancePhase};
