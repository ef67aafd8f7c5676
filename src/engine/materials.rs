//! Material override controls.

use super::ShowroomEngine;
use crate::material::{MaterialOverrides, TexturePreset};

impl ShowroomEngine {
    /// The active override axes.
    #[must_use]
    pub fn material_overrides(&self) -> MaterialOverrides {
        self.overrides
    }

    /// Toggle wireframe rendering across every material slot.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.overrides.wireframe = wireframe;
        self.options.wireframe = wireframe;
        self.overrides_dirty = true;
    }

    /// Set a flat color across every slot, or restore the captured
    /// originals with `None`.
    pub fn set_flat_color(&mut self, color: Option<[f32; 3]>) {
        self.overrides.flat_color = color;
        self.overrides_dirty = true;
    }

    /// Set a surface finish preset, or reset to the neutral defaults with
    /// `None`.
    pub fn set_preset(&mut self, preset: Option<TexturePreset>) {
        self.overrides.preset = preset;
        self.overrides_dirty = true;
    }

    /// Set a preset by its studio display name. Unknown names are ignored
    /// and reported as `false`.
    pub fn set_preset_by_name(&mut self, name: &str) -> bool {
        let Some((_, preset)) = TexturePreset::STUDIO_PRESETS
            .iter()
            .find(|(label, _)| *label == name)
        else {
            log::warn!("unknown material preset {name:?}");
            return false;
        };
        self.set_preset(Some(*preset));
        true
    }
}
