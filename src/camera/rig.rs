//! Camera framing and the post-load convergence protocol.
//!
//! After a swap, the target framing is asserted for a fixed number of
//! consecutive frames so it cannot be lost to the orbit controller's own
//! per-tick update. The countdown is an explicit record consulted once per
//! render tick, keyed to asset identity: a new asset mid-convergence
//! replaces the record outright and restarts the count.

use glam::Vec3;

use crate::camera::controller::OrbitController;
use crate::camera::core::Camera;
use crate::normalize::TARGET_SIZE;

/// Number of consecutive frames the framing is re-asserted after a load.
pub const CONVERGENCE_FRAMES: u32 = 10;

/// Transient convergence record; exists only during the post-load window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceState {
    /// Look-at target being asserted.
    pub target: Vec3,
    /// Eye position being asserted.
    pub position: Vec3,
    /// Frames left before the controller is handed back to the user.
    pub frames_remaining: u32,
    /// Asset-identity generation this convergence belongs to.
    pub generation: u64,
}

/// Derive the showroom framing for a model of the given normalized height.
#[must_use]
pub fn framing(height: f32) -> (Vec3, Vec3) {
    let target = Vec3::new(0.0, height * 0.45, 0.0);
    let distance = TARGET_SIZE * 2.8;
    let position = Vec3::new(distance * 0.7, distance * 0.4, distance * 0.9);
    (target, position)
}

/// Runs the convergence protocol against the orbit controller.
#[derive(Default)]
pub struct CameraRig {
    state: Option<ConvergenceState>,
    ready: bool,
}

impl CameraRig {
    /// Rig with no convergence in progress and controls not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) convergence for a freshly normalized model.
    /// Any in-progress countdown for an older asset is discarded.
    pub fn begin(&mut self, height: f32, generation: u64) {
        if let Some(stale) = self.state {
            log::debug!(
                "convergence gen {} interrupted by gen {generation}",
                stale.generation
            );
        }
        let (target, position) = framing(height);
        self.state = Some(ConvergenceState {
            target,
            position,
            frames_remaining: CONVERGENCE_FRAMES,
            generation,
        });
        self.ready = false;
    }

    /// Whether a convergence countdown is in progress.
    #[must_use]
    pub fn is_converging(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the controls-ready signal has fired for the current asset.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The current convergence record, if any.
    #[must_use]
    pub fn state(&self) -> Option<ConvergenceState> {
        self.state
    }

    /// One convergence frame: re-assert the framing on the controller and
    /// camera, disable damping, and clamp zoom/polar ranges. On the final
    /// frame damping is re-enabled and `true` is returned exactly once to
    /// signal "controls ready".
    pub fn tick(
        &mut self,
        controller: &mut OrbitController,
        camera: &mut Camera,
    ) -> bool {
        let Some(state) = &mut self.state else {
            return false;
        };

        controller.set_pose(state.target, state.position);
        camera.eye = state.position;
        camera.target = state.target;
        controller.min_distance = TARGET_SIZE * 0.8;
        controller.max_distance = TARGET_SIZE * 6.0;
        controller.min_polar = std::f32::consts::PI * 0.1;
        controller.max_polar = std::f32::consts::PI * 0.48;
        controller.set_damping(false);

        state.frames_remaining -= 1;
        if state.frames_remaining == 0 {
            controller.set_damping(true);
            self.state = None;
            self.ready = true;
            log::debug!("camera convergence complete, controls ready");
            return true;
        }
        false
    }
}
