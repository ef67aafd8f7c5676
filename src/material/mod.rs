//! Non-destructive material overrides over captured originals.
//!
//! Three independent axes — wireframe, flat color, texture preset — are
//! layered over the clone's materials. Originals are captured into a side
//! table immediately after cloning, before any override runs, so clearing
//! an axis restores exactly what the asset shipped with. Application is a
//! pure function of `(captured state, override state)` and idempotent, run
//! once per frame-of-change rather than per render tick.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::scene::{DisplayClone, NodeId};

/// Metalness applied when no preset is active.
pub const DEFAULT_METALNESS: f32 = 0.5;
/// Roughness applied when no preset is active.
pub const DEFAULT_ROUGHNESS: f32 = 0.5;
/// Emissive intensity applied when no preset is active.
pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 0.0;

/// A texture-preset bundle: surface parameters applied together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexturePreset {
    /// Metalness factor.
    pub metalness: f32,
    /// Roughness factor.
    pub roughness: f32,
    /// Emissive intensity.
    pub emissive_intensity: f32,
}

impl TexturePreset {
    /// Mirror-like chrome.
    pub const CHROME: TexturePreset = TexturePreset {
        metalness: 1.0,
        roughness: 0.05,
        emissive_intensity: 0.0,
    };
    /// Brushed metal.
    pub const BRUSHED_METAL: TexturePreset = TexturePreset {
        metalness: 0.9,
        roughness: 0.35,
        emissive_intensity: 0.0,
    };
    /// Hard plastic.
    pub const PLASTIC: TexturePreset = TexturePreset {
        metalness: 0.0,
        roughness: 0.4,
        emissive_intensity: 0.0,
    };
    /// Glossy glass.
    pub const GLASS: TexturePreset = TexturePreset {
        metalness: 0.1,
        roughness: 0.0,
        emissive_intensity: 0.1,
    };
    /// Fully matte surface.
    pub const MATTE: TexturePreset = TexturePreset {
        metalness: 0.0,
        roughness: 1.0,
        emissive_intensity: 0.0,
    };
    /// Glazed ceramic.
    pub const CERAMIC: TexturePreset = TexturePreset {
        metalness: 0.2,
        roughness: 0.15,
        emissive_intensity: 0.0,
    };
    /// Soft rubber.
    pub const RUBBER: TexturePreset = TexturePreset {
        metalness: 0.0,
        roughness: 0.85,
        emissive_intensity: 0.0,
    };

    /// The named presets offered by the showroom UI.
    pub const STUDIO_PRESETS: [(&'static str, TexturePreset); 7] = [
        ("Chrome", Self::CHROME),
        ("Brushed Metal", Self::BRUSHED_METAL),
        ("Plastic", Self::PLASTIC),
        ("Glass", Self::GLASS),
        ("Matte", Self::MATTE),
        ("Ceramic", Self::CERAMIC),
        ("Rubber", Self::RUBBER),
    ];
}

/// The three override axes. All default to "no override".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaterialOverrides {
    /// Wireframe rendering.
    pub wireframe: bool,
    /// Flat color across every slot; `None` restores captured originals.
    pub flat_color: Option<[f32; 3]>,
    /// Texture preset; `None` resets to the fixed defaults (never to a
    /// previous preset's values).
    pub preset: Option<TexturePreset>,
}

/// Side table of originally captured colors, keyed by
/// `(node id, material slot)`.
#[derive(Debug, Default)]
pub struct MaterialState {
    originals: FxHashMap<(NodeId, usize), [f32; 3]>,
}

impl MaterialState {
    /// Capture the original color of every material slot in `clone`.
    ///
    /// Must run immediately after cloning, before any override is applied.
    #[must_use]
    pub fn capture(clone: &DisplayClone) -> Self {
        let mut originals = FxHashMap::default();
        clone.for_each_material(|id, slot, material| {
            let _ = originals.insert((id, slot), material.color);
        });
        log::debug!("captured {} original material slots", originals.len());
        Self { originals }
    }

    /// The captured color for one slot.
    #[must_use]
    pub fn original_color(&self, id: NodeId, slot: usize) -> Option<[f32; 3]> {
        self.originals.get(&(id, slot)).copied()
    }

    /// Number of captured slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

/// Apply `overrides` to every material slot of `clone`.
///
/// Pure in `(state, overrides)`: repeated application with the same inputs
/// leaves the clone unchanged.
pub fn apply(
    state: &MaterialState,
    overrides: &MaterialOverrides,
    clone: &mut DisplayClone,
) {
    clone.for_each_material_mut(|id, slot, material| {
        material.wireframe = overrides.wireframe;

        match overrides.flat_color {
            Some(color) => material.color = color,
            None => {
                if let Some(original) = state.original_color(id, slot) {
                    material.color = original;
                }
            }
        }

        match overrides.preset {
            Some(preset) => {
                material.metalness = preset.metalness;
                material.roughness = preset.roughness;
                material.emissive_intensity = preset.emissive_intensity;
            }
            None => {
                material.metalness = DEFAULT_METALNESS;
                material.roughness = DEFAULT_ROUGHNESS;
                material.emissive_intensity = DEFAULT_EMISSIVE_INTENSITY;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::test_support::box_graph_with_colors;
    use crate::scene::DisplayClone;

    fn two_slot_clone() -> (DisplayClone, MaterialState) {
        let graph = box_graph_with_colors(
            Vec3::ONE,
            &[[0.8, 0.2, 0.1], [0.1, 0.9, 0.3]],
        );
        let clone = DisplayClone::from_graph(&graph, 1);
        let state = MaterialState::capture(&clone);
        (clone, state)
    }

    #[test]
    fn test_capture_records_every_slot() {
        let (_, state) = two_slot_clone();
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_flat_color_round_trip_restores_originals() {
        let (mut clone, state) = two_slot_clone();

        let mut overrides = MaterialOverrides {
            flat_color: Some([0.0, 0.0, 1.0]),
            ..MaterialOverrides::default()
        };
        apply(&state, &overrides, &mut clone);
        clone.for_each_material(|_, _, m| {
            assert_eq!(m.color, [0.0, 0.0, 1.0]);
        });

        overrides.flat_color = None;
        apply(&state, &overrides, &mut clone);
        clone.for_each_material(|id, slot, m| {
            assert_eq!(
                Some(m.color),
                state.original_color(id, slot),
                "slot ({id:?}, {slot}) not restored"
            );
        });
    }

    #[test]
    fn test_clearing_preset_resets_to_fixed_defaults() {
        let (mut clone, state) = two_slot_clone();

        let mut overrides = MaterialOverrides {
            preset: Some(TexturePreset::CHROME),
            ..MaterialOverrides::default()
        };
        apply(&state, &overrides, &mut clone);
        clone.for_each_material(|_, _, m| {
            assert_eq!(m.metalness, 1.0);
            assert_eq!(m.roughness, 0.05);
        });

        // Clearing must reset to the defaults, not keep chrome's values.
        overrides.preset = None;
        apply(&state, &overrides, &mut clone);
        clone.for_each_material(|_, _, m| {
            assert_eq!(m.metalness, DEFAULT_METALNESS);
            assert_eq!(m.roughness, DEFAULT_ROUGHNESS);
            assert_eq!(m.emissive_intensity, DEFAULT_EMISSIVE_INTENSITY);
        });
    }

    #[test]
    fn test_apply_is_idempotent() {
        let (mut clone, state) = two_slot_clone();
        let overrides = MaterialOverrides {
            wireframe: true,
            flat_color: Some([0.5, 0.5, 0.5]),
            preset: Some(TexturePreset::MATTE),
        };
        apply(&state, &overrides, &mut clone);
        // Compare the override-driven scalars; GPU texture handles are not
        // comparable and `apply` never touches them.
        let snapshot: Vec<_> = {
            let mut v = Vec::new();
            clone.for_each_material(|_, _, m| {
                v.push((
                    m.color,
                    m.metalness,
                    m.roughness,
                    m.emissive_intensity,
                    m.wireframe,
                ));
            });
            v
        };

        apply(&state, &overrides, &mut clone);
        let mut i = 0;
        clone.for_each_material(|_, _, m| {
            assert_eq!(
                (
                    m.color,
                    m.metalness,
                    m.roughness,
                    m.emissive_intensity,
                    m.wireframe,
                ),
                snapshot[i]
            );
            i += 1;
        });
    }

    #[test]
    fn test_axes_are_independent() {
        let (mut clone, state) = two_slot_clone();
        let overrides = MaterialOverrides {
            wireframe: true,
            flat_color: None,
            preset: None,
        };
        apply(&state, &overrides, &mut clone);
        clone.for_each_material(|id, slot, m| {
            assert!(m.wireframe);
            // Colors untouched by the wireframe axis.
            assert_eq!(Some(m.color), state.original_color(id, slot));
        });
    }

    #[test]
    fn test_studio_preset_table_is_complete() {
        assert_eq!(TexturePreset::STUDIO_PRESETS.len(), 7);
        let names: Vec<_> = TexturePreset::STUDIO_PRESETS
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert!(names.contains(&"Chrome"));
        assert!(names.contains(&"Rubber"));
    }
}
