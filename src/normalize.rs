//! Asset normalization: fit any model into the fixed showroom frame.
//!
//! Arbitrary assets arrive with unknown scale, origin, and unit convention.
//! Normalization scales the displayed clone so its largest dimension equals
//! [`TARGET_SIZE`], then re-measures the scaled graph to derive the offset
//! that centers it on X/Z and floors it to Y = 0.
//!
//! The post-scale bounding box is obtained by re-measuring the transformed
//! graph, not by scaling the pre-measure analytically: under non-uniform
//! parent transforms the two are not interchangeable.

use glam::Vec3;

use crate::scene::DisplayClone;

/// Largest dimension of a normalized model. Every camera framing distance,
/// zoom clamp, and platform ratio is derived from this constant.
pub const TARGET_SIZE: f32 = 2.0;

/// The result of normalizing one asset. Computed exactly once per load and
/// immutable until the next swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedModel {
    /// Uniform scale applied to the clone root.
    pub scale_factor: f32,
    /// Centering/floor translation applied after scaling.
    pub offset: Vec3,
    /// Horizontal extent after scaling: `max(size.x, size.z)`.
    pub footprint: f32,
    /// Vertical extent after scaling.
    pub height: f32,
    /// Largest scaled dimension; equals [`TARGET_SIZE`] except for
    /// degenerate geometry.
    pub max_dim: f32,
}

/// Normalize `clone` in place and report the derived measurements.
///
/// Idempotent: the fit is computed from the clone's untransformed bounds,
/// so re-invoking on an already-normalized clone reproduces the same scale
/// and offset instead of compounding on its own output.
pub fn normalize(clone: &mut DisplayClone) -> NormalizedModel {
    clone.root_scale = 1.0;
    clone.root_offset = Vec3::ZERO;
    let raw = clone.bounding_box();
    let max_dim = raw.max_dim();

    let scale_factor = if max_dim > 0.0 {
        TARGET_SIZE / max_dim
    } else {
        // Degenerate geometry (zero extent): display as-is rather than
        // dividing by zero. Recoverable, not an error.
        log::debug!("degenerate bounding box ({max_dim}), clamping scale to 1");
        1.0
    };
    clone.root_scale = scale_factor;

    // Re-measure after scaling; never derive this box analytically.
    let scaled = clone.bounding_box();
    let size = scaled.size();
    let center = scaled.center();
    // size/center degrade to zero for a clone with no geometry, so this
    // stays finite where `-scaled.min.y` would not.
    clone.root_offset =
        Vec3::new(-center.x, size.y * 0.5 - center.y, -center.z);

    let model = NormalizedModel {
        scale_factor,
        offset: clone.root_offset,
        footprint: size.x.max(size.z),
        height: size.y,
        max_dim: scaled.max_dim(),
    };
    log::debug!(
        "normalized: scale {:.4}, footprint {:.3}, height {:.3}",
        model.scale_factor,
        model.footprint,
        model.height
    );
    model
}
