//! Entrance animation: scale/opacity ease-in on asset swap.
//!
//! On swap the clone scales from 0.8 to 1.0 while every material fades in,
//! following a cubic ease-out. The animator owns only the entrance scale
//! and material opacity; the model's Y position belongs exclusively to the
//! normalization offset and is never touched here.

use crate::scene::{DisplayClone, NodeId};
use crate::util::easing::{lerp, EasingFunction};

/// Progress rate: `progress += dt * ENTRANCE_SPEED`.
pub const ENTRANCE_SPEED: f32 = 0.9;
/// Entrance scale at t = 0.
pub const START_SCALE: f32 = 0.8;

/// Animation lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntrancePhase {
    /// No clone has been animated yet.
    #[default]
    Idle,
    /// Easing in progress.
    Animating,
    /// Entrance complete; materials are opaque again.
    Done,
}

/// Scale/opacity entrance state machine, restarted on every swap.
#[derive(Default)]
pub struct EntranceAnimator {
    phase: EntrancePhase,
    progress: f32,
    /// Material list cached once per swap; never re-traversed per tick.
    cached_slots: Vec<(NodeId, usize)>,
    generation: u64,
}

impl EntranceAnimator {
    /// Animator in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> EntrancePhase {
        self.phase
    }

    /// Whether easing is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.phase == EntrancePhase::Animating
    }

    /// Generation of the clone this animator is driving.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Restart the entrance for a freshly installed clone: reset scale to
    /// 0.8, zero every material's opacity, and cache the material list.
    pub fn begin(&mut self, clone: &mut DisplayClone) {
        clone.group_scale = START_SCALE;

        self.cached_slots.clear();
        clone.for_each_material_mut(|id, slot, material| {
            material.transparent = true;
            material.opacity = 0.0;
            self.cached_slots.push((id, slot));
        });

        self.progress = 0.0;
        self.phase = EntrancePhase::Animating;
        self.generation = clone.generation();
    }

    /// Advance the easing by `dt` seconds. Returns `true` on the tick the
    /// animation completes.
    pub fn tick(&mut self, clone: &mut DisplayClone, dt: f32) -> bool {
        if self.phase != EntrancePhase::Animating {
            return false;
        }

        self.progress += dt * ENTRANCE_SPEED;
        let t = self.progress.min(1.0);
        let ease = EasingFunction::CubicOut.evaluate(t);

        clone.group_scale = lerp(START_SCALE, 1.0, ease);

        let finished = t >= 1.0;
        for &(id, slot) in &self.cached_slots {
            if let Some(material) = clone.material_mut(id, slot) {
                material.opacity = ease;
                if finished {
                    material.transparent = false;
                }
            }
        }

        if finished {
            self.phase = EntrancePhase::Done;
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::test_support::box_graph;
    use crate::scene::DisplayClone;

    const EPS: f32 = 1e-5;

    fn clone_with_slots() -> DisplayClone {
        DisplayClone::from_graph(&box_graph(Vec3::ONE, 2), 1)
    }

    #[test]
    fn test_begin_resets_scale_and_opacity() {
        let mut clone = clone_with_slots();
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);

        assert_eq!(anim.phase(), EntrancePhase::Animating);
        assert!((clone.group_scale - START_SCALE).abs() < EPS);
        clone.for_each_material(|_, _, m| {
            assert!(m.transparent);
            assert_eq!(m.opacity, 0.0);
        });
    }

    #[test]
    fn test_completion_state() {
        let mut clone = clone_with_slots();
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);

        // 0.9 progress/sec: two half-second steps pass t = 1.
        assert!(!anim.tick(&mut clone, 0.5));
        assert!(anim.tick(&mut clone, 2.0));
        assert_eq!(anim.phase(), EntrancePhase::Done);

        assert!((clone.group_scale - 1.0).abs() < EPS);
        clone.for_each_material(|_, _, m| {
            assert!((m.opacity - 1.0).abs() < EPS);
            assert!(!m.transparent, "transparency flag must clear at t=1");
        });

        // Further ticks are no-ops.
        assert!(!anim.tick(&mut clone, 1.0));
    }

    #[test]
    fn test_midpoint_follows_cubic_ease() {
        let mut clone = clone_with_slots();
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);

        // dt such that progress = 0.5 → ease = 1 - 0.5³ = 0.875.
        let _ = anim.tick(&mut clone, 0.5 / ENTRANCE_SPEED);
        let expected_scale = START_SCALE + (1.0 - START_SCALE) * 0.875;
        assert!((clone.group_scale - expected_scale).abs() < 1e-4);
        clone.for_each_material(|_, _, m| {
            assert!((m.opacity - 0.875).abs() < 1e-4);
            assert!(m.transparent, "still transparent before t=1");
        });
    }

    #[test]
    fn test_restart_on_swap() {
        let mut clone = clone_with_slots();
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);
        let _ = anim.tick(&mut clone, 5.0);
        assert_eq!(anim.phase(), EntrancePhase::Done);

        let mut next = DisplayClone::from_graph(&box_graph(Vec3::ONE, 1), 2);
        anim.begin(&mut next);
        assert_eq!(anim.phase(), EntrancePhase::Animating);
        assert_eq!(anim.generation(), 2);
        assert!((next.group_scale - START_SCALE).abs() < EPS);
    }

    #[test]
    fn test_tick_drives_only_slots_cached_at_begin() {
        use crate::asset::TextureMaps;
        use crate::scene::MaterialInstance;

        let mut clone = clone_with_slots();
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);

        // A slot appearing after begin is outside the cached list and must
        // be left alone by the fade.
        let mesh = clone.nodes_mut()[0].mesh.as_mut().unwrap();
        mesh.materials.push(MaterialInstance {
            color: [1.0; 3],
            metalness: 0.0,
            roughness: 1.0,
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
            wireframe: false,
            maps: TextureMaps::default(),
            gpu_textures: None,
        });

        let _ = anim.tick(&mut clone, 0.5 / ENTRANCE_SPEED);
        let mats = &clone.nodes()[0].mesh.as_ref().unwrap().materials;
        assert!((mats[0].opacity - 0.875).abs() < 1e-4);
        assert!((mats[1].opacity - 0.875).abs() < 1e-4);
        assert!((mats[2].opacity - 1.0).abs() < EPS);
        assert!(!mats[2].transparent);
    }

    #[test]
    fn test_never_touches_offset() {
        let mut clone = clone_with_slots();
        clone.root_offset = Vec3::new(0.1, 0.25, -0.3);
        let mut anim = EntranceAnimator::new();
        anim.begin(&mut clone);
        let _ = anim.tick(&mut clone, 0.5);
        let _ = anim.tick(&mut clone, 5.0);
        assert_eq!(clone.root_offset, Vec3::new(0.1, 0.25, -0.3));
    }
}
