//! Interactive orbit controller.
//!
//! Orbits the camera around a focus target in spherical coordinates with
//! optional damped inertia. Its [`OrbitController::update`] runs every
//! render tick and re-derives the camera eye from its own spherical state —
//! which means a bare assignment to the camera can be silently overwritten
//! within the same frame. The convergence rig handles that by writing
//! through [`OrbitController::set_pose`] for several consecutive frames.

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;

/// Orbit controller state and input parameters.
pub struct OrbitController {
    target: Vec3,
    /// Azimuth angle around Y, radians.
    yaw: f32,
    /// Polar angle from the +Y axis, radians.
    polar: f32,
    distance: f32,

    yaw_velocity: f32,
    polar_velocity: f32,
    zoom_velocity: f32,

    /// Minimum zoom distance.
    pub min_distance: f32,
    /// Maximum zoom distance.
    pub max_distance: f32,
    /// Minimum polar angle (radians from +Y).
    pub min_polar: f32,
    /// Maximum polar angle (radians from +Y).
    pub max_polar: f32,

    damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    enabled: bool,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    /// Controller with showroom input tuning and wide-open clamps.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            polar: std::f32::consts::FRAC_PI_3,
            distance: 5.0,
            yaw_velocity: 0.0,
            polar_velocity: 0.0,
            zoom_velocity: 0.0,
            min_distance: 0.1,
            max_distance: 100.0,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI,
            damping: true,
            damping_factor: 0.06,
            rotate_speed: 0.6,
            zoom_speed: 0.7,
            enabled: false,
        }
    }

    /// Whether user input is currently accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable user input. Disabling also kills any inertia so
    /// the camera cannot drift while gated.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.yaw_velocity = 0.0;
            self.polar_velocity = 0.0;
            self.zoom_velocity = 0.0;
        }
    }

    /// Whether damped inertia is active.
    #[must_use]
    pub fn damping(&self) -> bool {
        self.damping
    }

    /// Toggle damped inertia.
    pub fn set_damping(&mut self, damping: bool) {
        self.damping = damping;
    }

    /// Current focus target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Feed a rotate gesture (screen-space delta, radians-ish units).
    pub fn rotate(&mut self, delta: Vec2) {
        if !self.enabled {
            return;
        }
        let scaled = delta * self.rotate_speed * 0.01;
        if self.damping {
            self.yaw_velocity -= scaled.x;
            self.polar_velocity -= scaled.y;
        } else {
            self.yaw -= scaled.x;
            self.polar -= scaled.y;
        }
    }

    /// Feed a zoom gesture (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        let scaled = delta * self.zoom_speed * 0.05;
        if self.damping {
            self.zoom_velocity += scaled;
        } else {
            self.distance *= 1.0 - scaled;
        }
    }

    /// Overwrite the controller's spherical state from an explicit pose.
    /// The next `update` will reproduce exactly this framing.
    pub fn set_pose(&mut self, target: Vec3, eye: Vec3) {
        self.target = target;
        let offset = eye - target;
        self.distance = offset.length().max(1e-6);
        self.polar = (offset.y / self.distance).clamp(-1.0, 1.0).acos();
        self.yaw = offset.x.atan2(offset.z);
        self.yaw_velocity = 0.0;
        self.polar_velocity = 0.0;
        self.zoom_velocity = 0.0;
    }

    /// Per-tick update: integrate inertia, clamp, and write the derived
    /// eye/target into `camera`. Runs every frame whether or not input is
    /// enabled — this is the competing loop the convergence rig must win
    /// against.
    pub fn update(&mut self, camera: &mut Camera) {
        self.yaw += self.yaw_velocity;
        self.polar += self.polar_velocity;
        self.distance *= 1.0 - self.zoom_velocity;

        if self.damping {
            let keep = 1.0 - self.damping_factor;
            self.yaw_velocity *= keep;
            self.polar_velocity *= keep;
            self.zoom_velocity *= keep;
        } else {
            self.yaw_velocity = 0.0;
            self.polar_velocity = 0.0;
            self.zoom_velocity = 0.0;
        }

        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        let offset = Vec3::new(
            self.distance * self.polar.sin() * self.yaw.sin(),
            self.distance * self.polar.cos(),
            self.distance * self.polar.sin() * self.yaw.cos(),
        );
        camera.eye = self.target + offset;
        camera.target = self.target;
        camera.up = Vec3::Y;
    }
}
