//! Read-only engine state queries for hosts.

use super::{ShowroomEngine, Spinner};
use crate::camera::{Camera, OrbitController};
use crate::lighting::LightingRig;
use crate::normalize::NormalizedModel;
use crate::options::ViewerOptions;
use crate::platform::PlatformState;
use crate::scene::lifecycle::DisposeStats;
use crate::scene::DisplayClone;

impl ShowroomEngine {
    /// Measurements of the displayed model, once normalization has run.
    #[must_use]
    pub fn normalized_model(&self) -> Option<NormalizedModel> {
        self.normalized
    }

    /// The displayed clone.
    #[must_use]
    pub fn current_clone(&self) -> Option<&DisplayClone> {
        self.lifecycle.current()
    }

    /// Address of the displayed asset.
    #[must_use]
    pub fn current_address(&self) -> Option<&str> {
        self.lifecycle.current_address()
    }

    /// Whether a display request is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_pending()
    }

    /// Whether orbit input currently reaches the controller.
    #[must_use]
    pub fn interaction_enabled(&self) -> bool {
        self.controller.is_enabled()
    }

    /// The showroom camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit controller.
    #[must_use]
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// The platform sized for the displayed model.
    #[must_use]
    pub fn platform(&self) -> &PlatformState {
        &self.platform
    }

    /// The lighting rig scaled to the platform.
    #[must_use]
    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    /// The loading spinner pose.
    #[must_use]
    pub fn spinner(&self) -> Spinner {
        self.spinner
    }

    /// Current viewer options, including mutations made through the engine.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Number of decoded graphs held by the cache.
    #[must_use]
    pub fn cached_assets(&self) -> usize {
        self.cache.len()
    }

    /// A cached decode, if present.
    #[must_use]
    pub fn cached_graph(
        &self,
        address: &str,
    ) -> Option<std::sync::Arc<crate::asset::SceneGraph>> {
        self.cache.get(address)
    }

    /// Disposal bookkeeping totals.
    #[must_use]
    pub fn dispose_stats(&self) -> DisposeStats {
        self.lifecycle.stats()
    }

    /// Smoothed frames-per-second measurement.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}
