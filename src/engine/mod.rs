//! The showroom engine facade.
//!
//! [`ShowroomEngine`] owns every subsystem — decode cache, clone lifecycle,
//! normalization state, camera rig, entrance animation, platform, lighting,
//! materials, and annotations — and exposes the small surface a host embeds:
//! request a display swap, tick once per frame, drain events, forward input.
//!
//! The engine renders nothing itself. A host drives it against its own
//! render loop and reads the clone, camera, platform, and lighting state
//! back out each frame.

mod annotations;
mod frame;
mod materials;
mod queries;
mod swap;

use glam::Vec3;

use crate::animation::EntranceAnimator;
use crate::annotation::AnnotationSet;
use crate::asset::AssetCache;
use crate::camera::{Camera, CameraRig, OrbitController};
use crate::gpu::render_context::RenderContext;
use crate::lighting::LightingRig;
use crate::material::{MaterialOverrides, MaterialState};
use crate::normalize::NormalizedModel;
use crate::options::ViewerOptions;
use crate::platform::PlatformState;
use crate::scene::lifecycle::LifecycleManager;
use crate::util::frame_clock::FrameClock;

pub use frame::Spinner;

/// Host-visible notifications, drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowroomEvent {
    /// A freshly installed model finished normalizing.
    ModelNormalized {
        /// Asset address of the installed model.
        address: String,
        /// Horizontal extent after normalization.
        footprint: f32,
        /// Vertical extent after normalization.
        height: f32,
        /// Largest scaled dimension.
        max_dim: f32,
    },
    /// Camera convergence finished; orbit controls are live.
    ControlsReady,
    /// A marker was placed on the model surface.
    AnnotationAdded {
        /// Marker id.
        id: u64,
        /// Snapped world position.
        position: [f32; 3],
    },
    /// A marker was deleted.
    AnnotationDeleted {
        /// Marker id.
        id: u64,
    },
    /// The in-flight load for the current request failed.
    DecodeFailed {
        /// Asset address that failed to decode.
        address: String,
        /// Human-readable failure description.
        reason: String,
    },
}

/// Top-level showroom state machine.
pub struct ShowroomEngine {
    context: Option<RenderContext>,
    options: ViewerOptions,

    cache: AssetCache,
    lifecycle: LifecycleManager,
    normalized: Option<NormalizedModel>,

    material_state: MaterialState,
    overrides: MaterialOverrides,
    overrides_dirty: bool,

    camera: Camera,
    controller: OrbitController,
    rig: CameraRig,

    entrance: EntranceAnimator,
    platform: PlatformState,
    lighting: LightingRig,
    annotations: AnnotationSet,
    spinner: Spinner,

    timing: FrameClock,
    events: Vec<ShowroomEvent>,
}

impl ShowroomEngine {
    /// Engine without a GPU context: clones are never uploaded, everything
    /// else behaves identically. Suitable for headless hosts.
    #[must_use]
    pub fn new(options: ViewerOptions, aspect: f32) -> Self {
        let platform = PlatformState::for_footprint(0.0);
        let lighting =
            LightingRig::for_radius(platform.radius(), options.light_color);
        let overrides = MaterialOverrides {
            wireframe: options.wireframe,
            ..MaterialOverrides::default()
        };
        Self {
            context: None,
            options,
            cache: AssetCache::new(),
            lifecycle: LifecycleManager::new(),
            normalized: None,
            material_state: MaterialState::default(),
            overrides,
            overrides_dirty: false,
            camera: Camera::showroom(aspect),
            controller: OrbitController::new(),
            rig: CameraRig::new(),
            entrance: EntranceAnimator::new(),
            platform,
            lighting,
            annotations: AnnotationSet::new(),
            spinner: Spinner::default(),
            timing: FrameClock::new(),
            events: Vec::new(),
        }
    }

    /// Engine that uploads clone resources through the given GPU context.
    #[must_use]
    pub fn with_context(
        context: RenderContext,
        options: ViewerOptions,
        aspect: f32,
    ) -> Self {
        let mut engine = Self::new(options, aspect);
        engine.context = Some(context);
        engine
    }

    /// Take all events accumulated since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<ShowroomEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward an orbit drag, in screen-space units.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controller.rotate(glam::Vec2::new(dx, dy));
    }

    /// Forward a zoom step (positive moves in).
    pub fn zoom(&mut self, delta: f32) {
        self.controller.zoom(delta);
    }

    /// Update the viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Set the key/top light tint and rebuild the lighting rig.
    pub fn set_light_color(&mut self, color: [f32; 3]) {
        self.options.light_color = color;
        self.lighting =
            LightingRig::for_radius(self.platform.radius(), color);
    }

    fn rebuild_lighting(&mut self) {
        self.lighting = LightingRig::for_radius(
            self.platform.radius(),
            self.options.light_color,
        );
    }

    fn push_event(&mut self, event: ShowroomEvent) {
        self.events.push(event);
    }
}

/// Default framing target before any model is displayed.
#[must_use]
pub fn empty_scene_focus() -> Vec3 {
    Vec3::new(0.0, crate::normalize::TARGET_SIZE * 0.25, 0.0)
}
