//! Showroom platform: disc layout, tick marks, and slow rotation.
//!
//! The platform is sized from the model's normalized footprint and fully
//! rebuilt on every swap. Only the tick-mark ring rotates; the discs and
//! glow stay fixed.

/// Floor of the platform radius in world units.
pub const MIN_PLATFORM_RADIUS: f32 = 2.0;
/// Footprint-to-radius margin.
pub const PLATFORM_MARGIN: f32 = 1.2;
/// Tick-ring angular velocity in radians per second.
pub const TICK_ROTATION_SPEED: f32 = 0.12;
/// Number of tick marks on the ring.
pub const TICK_COUNT: usize = 60;

/// Platform radius for a normalized footprint: `max(footprint * 1.2, 2)`.
#[must_use]
pub fn platform_radius(footprint: f32) -> f32 {
    (footprint * PLATFORM_MARGIN).max(MIN_PLATFORM_RADIUS)
}

/// One radial tick mark on the rotating ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Angle around the platform axis in radians.
    pub angle: f32,
    /// Inner end of the mark as a fraction of the platform radius.
    pub inner: f32,
    /// Outer end of the mark as a fraction of the platform radius.
    pub outer: f32,
    /// Half-width of the mark as a fraction of the platform radius.
    pub width: f32,
}

/// Static geometry of the platform, all radii in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformLayout {
    /// Base radius everything else is derived from.
    pub radius: f32,
    /// Soft contact-shadow disc under the platform.
    pub shadow_radius: f32,
    /// Inner edge of the fade ring blending the shadow out.
    pub fade_inner_radius: f32,
    /// Outer edge of the fade ring.
    pub fade_outer_radius: f32,
    /// Main platform disc.
    pub disc_radius: f32,
    /// Emissive glow disc at the center.
    pub glow_radius: f32,
    /// Thin rim just outside the disc, inner and outer radii.
    pub rim_radii: (f32, f32),
    /// Accent ring near the center, inner and outer radii.
    pub inner_ring_radii: (f32, f32),
    /// Tick marks at their rest angles.
    pub ticks: Vec<TickMark>,
}

impl PlatformLayout {
    /// Layout for a normalized footprint.
    #[must_use]
    pub fn for_footprint(footprint: f32) -> Self {
        let radius = platform_radius(footprint);
        let ticks = (0..TICK_COUNT)
            .map(|i| {
                let angle = (i as f32 / TICK_COUNT as f32)
                    * std::f32::consts::TAU;
                // Every fifth tick is long and wide.
                let long = i % 5 == 0;
                TickMark {
                    angle,
                    inner: if long { 0.48 } else { 0.62 },
                    outer: 0.95,
                    width: if long { 0.008 } else { 0.004 },
                }
            })
            .collect();
        Self {
            radius,
            shadow_radius: radius * 2.2,
            fade_inner_radius: radius * 1.5,
            fade_outer_radius: radius * 2.2,
            disc_radius: radius * 1.08,
            glow_radius: radius * 0.35,
            rim_radii: (radius * 1.04, radius * 1.08),
            inner_ring_radii: (radius * 0.44, radius * 0.46),
            ticks,
        }
    }
}

/// Live platform state: layout plus the tick-ring rotation angle.
pub struct PlatformState {
    layout: PlatformLayout,
    tick_rotation: f32,
}

impl PlatformState {
    /// Platform sized for a normalized footprint, ring at rest.
    #[must_use]
    pub fn for_footprint(footprint: f32) -> Self {
        Self {
            layout: PlatformLayout::for_footprint(footprint),
            tick_rotation: 0.0,
        }
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> &PlatformLayout {
        &self.layout
    }

    /// Base radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.layout.radius
    }

    /// Current tick-ring angle in radians, wrapped to one turn.
    #[must_use]
    pub fn tick_rotation(&self) -> f32 {
        self.tick_rotation
    }

    /// Replace the layout for a new footprint. The ring angle carries over
    /// so the rotation does not visibly jump across a swap.
    pub fn resize(&mut self, footprint: f32) {
        self.layout = PlatformLayout::for_footprint(footprint);
    }

    /// Advance the tick-ring rotation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick_rotation =
            (self.tick_rotation + dt * TICK_ROTATION_SPEED)
                % std::f32::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_radius_has_floor() {
        assert!((platform_radius(0.0) - 2.0).abs() < EPS);
        assert!((platform_radius(1.0) - 2.0).abs() < EPS);
        // Crossover: 1.2 * footprint exceeds the floor past 5/3.
        assert!((platform_radius(3.0) - 3.6).abs() < EPS);
    }

    #[test]
    fn test_resize_fully_replaces_layout() {
        let mut state = PlatformState::for_footprint(3.0);
        assert!((state.radius() - 3.6).abs() < EPS);
        let old_disc = state.layout().disc_radius;

        state.resize(1.0);
        assert!((state.radius() - 2.0).abs() < EPS);
        assert!((state.layout().disc_radius - 2.0 * 1.08).abs() < EPS);
        assert!(state.layout().disc_radius < old_disc);
    }

    #[test]
    fn test_layout_ratios() {
        let layout = PlatformLayout::for_footprint(3.0);
        let r = layout.radius;
        assert!((layout.shadow_radius - r * 2.2).abs() < EPS);
        assert!((layout.fade_inner_radius - r * 1.5).abs() < EPS);
        assert!((layout.fade_outer_radius - r * 2.2).abs() < EPS);
        assert!((layout.glow_radius - r * 0.35).abs() < EPS);
        assert!((layout.rim_radii.0 - r * 1.04).abs() < EPS);
        assert!((layout.inner_ring_radii.1 - r * 0.46).abs() < EPS);
    }

    #[test]
    fn test_tick_marks() {
        let layout = PlatformLayout::for_footprint(1.0);
        assert_eq!(layout.ticks.len(), TICK_COUNT);
        // Tick 0 is long, tick 1 is short.
        assert!((layout.ticks[0].inner - 0.48).abs() < EPS);
        assert!((layout.ticks[0].width - 0.008).abs() < EPS);
        assert!((layout.ticks[1].inner - 0.62).abs() < EPS);
        assert!((layout.ticks[1].width - 0.004).abs() < EPS);
        assert!((layout.ticks[1].angle
            - std::f32::consts::TAU / TICK_COUNT as f32)
            .abs()
            < EPS);
    }

    #[test]
    fn test_rotation_rate_and_wrap() {
        let mut state = PlatformState::for_footprint(1.0);
        state.advance(1.0);
        assert!((state.tick_rotation() - 0.12).abs() < EPS);
        state.advance(100.0);
        assert!(state.tick_rotation() < std::f32::consts::TAU);

        // Angle survives a resize.
        let before = state.tick_rotation();
        state.resize(4.0);
        assert!((state.tick_rotation() - before).abs() < EPS);
    }
}
