//! Four-light studio rig scaled to the platform radius.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Flat ambient term applied on top of the rig lights.
pub const AMBIENT_INTENSITY: f32 = 0.15;

/// One positional light in the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Scalar intensity multiplier.
    pub intensity: f32,
}

/// Key, fill, back, and top lights positioned around the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingRig {
    /// Main key light, front-right and high.
    pub key: Light,
    /// Cool fill from the opposite side.
    pub fill: Light,
    /// Back light separating the model from the background.
    pub back: Light,
    /// Overhead spot directly above the platform center.
    pub top: Light,
}

impl LightingRig {
    /// Rig scaled to `radius`, with the key and top lights tinted by the
    /// configured light color.
    #[must_use]
    pub fn for_radius(radius: f32, light_color: [f32; 3]) -> Self {
        let r = radius;
        Self {
            key: Light {
                position: Vec3::new(2.0 * r, 3.5 * r, 2.5 * r),
                color: light_color,
                intensity: 1.8,
            },
            fill: Light {
                position: Vec3::new(-3.0 * r, 2.0 * r, r),
                color: rgb(0xc0, 0xd0, 0xe8),
                intensity: 0.7,
            },
            back: Light {
                position: Vec3::new(0.5 * r, 2.0 * r, -3.5 * r),
                color: rgb(0xe0, 0xe0, 0xf0),
                intensity: 0.9,
            },
            top: Light {
                position: Vec3::new(0.0, 6.0 * r, 0.0),
                color: light_color,
                intensity: 1.2,
            },
        }
    }

    /// Pack the rig for GPU upload.
    #[must_use]
    pub fn to_uniform(&self) -> LightingUniform {
        let pack = |l: &Light| -> ([f32; 4], [f32; 4]) {
            (
                [l.position.x, l.position.y, l.position.z, 1.0],
                [l.color[0], l.color[1], l.color[2], l.intensity],
            )
        };
        let (kp, kc) = pack(&self.key);
        let (fp, fc) = pack(&self.fill);
        let (bp, bc) = pack(&self.back);
        let (tp, tc) = pack(&self.top);
        LightingUniform {
            positions: [kp, fp, bp, tp],
            colors: [kc, fc, bc, tc],
            ambient: [AMBIENT_INTENSITY, AMBIENT_INTENSITY, AMBIENT_INTENSITY, 0.0],
        }
    }
}

/// GPU layout for the rig: xyz position + w flag, rgb color + intensity.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightingUniform {
    /// Light positions, one vec4 per light.
    pub positions: [[f32; 4]; 4],
    /// Light colors with intensity in the w component.
    pub colors: [[f32; 4]; 4],
    /// Ambient color, unused w.
    pub ambient: [f32; 4],
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ]
}
