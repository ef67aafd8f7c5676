//! Per-frame advancement of every time-driven subsystem.

use super::{ShowroomEngine, ShowroomEvent};

/// Octahedron placeholder shown while the showroom is empty or loading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spinner {
    /// Spin around the vertical axis, radians.
    pub yaw: f32,
    /// Slow tumble around the horizontal axis, radians.
    pub tilt: f32,
}

impl Spinner {
    fn advance(&mut self, dt: f32) {
        self.yaw = (self.yaw + dt * 2.0) % std::f32::consts::TAU;
        self.tilt = (self.tilt + dt * 0.5) % std::f32::consts::TAU;
    }
}

impl ShowroomEngine {
    /// Advance the engine by `dt` seconds.
    ///
    /// Order matters: the orbit controller integrates first, then the
    /// camera rig re-asserts its framing on top while converging, so within
    /// any single frame the rig wins over user input.
    pub fn tick(&mut self, dt: f32) {
        self.controller.update(&mut self.camera);
        if self.rig.tick(&mut self.controller, &mut self.camera) {
            self.push_event(ShowroomEvent::ControlsReady);
        }

        // Two independent gates: convergence must have finished, and
        // placement mode must be off.
        self.controller.set_enabled(
            self.rig.is_ready() && !self.annotations.placement_mode(),
        );

        if let Some(clone) = self.lifecycle.current_mut() {
            let _ = self.entrance.tick(clone, dt);
            if self.overrides_dirty {
                crate::material::apply(
                    &self.material_state,
                    &self.overrides,
                    clone,
                );
                self.overrides_dirty = false;
            }
        }

        self.platform.advance(dt);
        if self.lifecycle.is_pending() || self.lifecycle.current().is_none() {
            self.spinner.advance(dt);
        }
    }

    /// Advance using wall-clock time since the previous call. Prefer
    /// [`tick`](Self::tick) when the host already tracks frame deltas.
    pub fn advance_frame(&mut self) {
        let dt = self.timing.end_frame();
        self.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;

    use crate::camera::CONVERGENCE_FRAMES;
    use crate::engine::{ShowroomEngine, ShowroomEvent};
    use crate::options::ViewerOptions;
    use crate::scene::test_support::box_graph;

    fn engine_with_model() -> ShowroomEngine {
        let mut engine = ShowroomEngine::new(ViewerOptions::default(), 1.6);
        let token = engine.request_display("models/a.glb");
        engine.finish_load(&token, Arc::new(box_graph(Vec3::ONE, 1)));
        let _ = engine.drain_events();
        engine
    }

    #[test]
    fn test_controls_ready_after_convergence() {
        let mut engine = engine_with_model();
        assert!(!engine.interaction_enabled());

        let mut ready_events = 0;
        for _ in 0..CONVERGENCE_FRAMES + 3 {
            engine.tick(1.0 / 60.0);
            for event in engine.drain_events() {
                if event == ShowroomEvent::ControlsReady {
                    ready_events += 1;
                }
            }
        }
        assert_eq!(ready_events, 1);
        assert!(engine.interaction_enabled());
    }

    #[test]
    fn test_convergence_overrides_user_input() {
        let mut engine = engine_with_model();
        engine.tick(1.0 / 60.0);
        let framed = engine.camera().eye;
        // Input during convergence is dropped and the framing re-asserted.
        engine.orbit(50.0, 20.0);
        engine.zoom(3.0);
        engine.tick(1.0 / 60.0);
        assert!((engine.camera().eye - framed).length() < 1e-4);
    }

    #[test]
    fn test_placement_mode_disables_orbit() {
        let mut engine = engine_with_model();
        for _ in 0..CONVERGENCE_FRAMES {
            engine.tick(1.0 / 60.0);
        }
        assert!(engine.interaction_enabled());

        engine.set_placement_mode(true);
        engine.tick(1.0 / 60.0);
        assert!(!engine.interaction_enabled());

        engine.set_placement_mode(false);
        engine.tick(1.0 / 60.0);
        assert!(engine.interaction_enabled());
    }

    #[test]
    fn test_entrance_completes_through_ticks() {
        let mut engine = engine_with_model();
        assert!(engine.current_clone().unwrap().group_scale < 1.0);
        for _ in 0..200 {
            engine.tick(1.0 / 60.0);
        }
        let clone = engine.current_clone().unwrap();
        assert!((clone.group_scale - 1.0).abs() < 1e-5);
        clone.for_each_material(|_, _, m| assert!((m.opacity - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_spinner_runs_only_while_empty_or_loading() {
        let mut engine = ShowroomEngine::new(ViewerOptions::default(), 1.6);
        engine.tick(0.5);
        assert!((engine.spinner().yaw - 1.0).abs() < 1e-5);
        assert!((engine.spinner().tilt - 0.25).abs() < 1e-5);

        let token = engine.request_display("models/a.glb");
        engine.finish_load(&token, Arc::new(box_graph(Vec3::ONE, 1)));
        let frozen = engine.spinner().yaw;
        engine.tick(0.5);
        assert!((engine.spinner().yaw - frozen).abs() < 1e-5);
    }

    #[test]
    fn test_platform_ring_rotates_every_frame() {
        let mut engine = engine_with_model();
        engine.tick(1.0);
        assert!((engine.platform().tick_rotation() - 0.12).abs() < 1e-5);
    }
}
