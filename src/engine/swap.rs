//! Display swap protocol: request, resolve, fail, clear.

use std::path::Path;
use std::sync::Arc;

use glam::Vec3;

use super::{empty_scene_focus, ShowroomEngine, ShowroomEvent};
use crate::asset::{loader, SceneGraph};
use crate::error::VitrineError;
use crate::material::MaterialState;
use crate::scene::lifecycle::{InstallOutcome, LoadToken};

impl ShowroomEngine {
    /// Begin a display swap. The returned token must accompany the matching
    /// [`finish_load`](Self::finish_load) or [`fail_load`](Self::fail_load)
    /// call; a newer request supersedes it.
    pub fn request_display(&mut self, address: &str) -> LoadToken {
        self.lifecycle.begin_load(address)
    }

    /// Decode `path` synchronously and swap to it.
    ///
    /// Cached decodes are reused without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the decode error after recording the failure; superseded
    /// requests never surface errors.
    pub fn display_path(&mut self, path: &Path) -> Result<(), VitrineError> {
        let address = path.to_string_lossy().into_owned();
        let token = self.request_display(&address);

        if let Some(graph) = self.cache.get(&address) {
            self.finish_load(&token, graph);
            return Ok(());
        }
        match loader::load_path(path) {
            Ok(graph) => {
                self.finish_load(&token, graph);
                Ok(())
            }
            Err(e) => {
                self.fail_load(&token, &e.to_string());
                Err(e)
            }
        }
    }

    /// Resolve a load with its decoded graph. Superseded tokens install
    /// nothing, but the decode is still cached for later requests.
    pub fn finish_load(&mut self, token: &LoadToken, graph: Arc<SceneGraph>) {
        let address = token.address().to_owned();
        if self.cache.get(&address).is_none() {
            self.cache.insert(&address, Arc::clone(&graph));
        }

        match self.lifecycle.install(token, &graph) {
            InstallOutcome::Superseded => {}
            InstallOutcome::Installed(replaced) => {
                let _ = self.cache.retain(&address);
                if let Some(old) = replaced {
                    let _ = self.cache.release(&old);
                }
                self.after_install(&address);
            }
        }
    }

    /// Record a decode failure. Emits [`ShowroomEvent::DecodeFailed`] only
    /// when the failure belongs to the current in-flight request.
    pub fn fail_load(&mut self, token: &LoadToken, reason: &str) {
        if self.lifecycle.fail(token) {
            log::warn!("load failed for {}: {reason}", token.address());
            self.push_event(ShowroomEvent::DecodeFailed {
                address: token.address().to_owned(),
                reason: reason.to_owned(),
            });
        }
    }

    /// Dispose the displayed clone and return to the empty showroom.
    /// Annotations survive; the next displayed model inherits them.
    pub fn clear_display(&mut self) {
        if let Some(address) = self.lifecycle.teardown() {
            let _ = self.cache.release(&address);
        }
        self.normalized = None;
        self.material_state = MaterialState::default();
        self.controller
            .set_pose(empty_scene_focus(), Vec3::new(5.0, 3.0, 5.0));
    }

    /// Drop a cached decode. Refused while the graph is referenced by a
    /// displayed clone.
    pub fn invalidate_cached(&mut self, address: &str) -> bool {
        self.cache.invalidate(address)
    }

    /// Normalize the freshly installed clone and restart every per-model
    /// subsystem around it.
    fn after_install(&mut self, address: &str) {
        if let Some(context) = &self.context {
            if let Some(clone) = self.lifecycle.current_mut() {
                clone.upload(context);
            }
        }

        self.normalized = None;
        let Some(clone) = self.lifecycle.current_mut() else {
            return;
        };
        let model = crate::normalize::normalize(clone);
        let generation = clone.generation();
        self.material_state = MaterialState::capture(clone);
        crate::material::apply(&self.material_state, &self.overrides, clone);
        self.entrance.begin(clone);

        self.normalized = Some(model);
        self.platform.resize(model.footprint);
        self.rebuild_lighting();
        self.rig.begin(model.height, generation);
        self.options.last_asset = Some(address.to_owned());
        self.push_event(ShowroomEvent::ModelNormalized {
            address: address.to_owned(),
            footprint: model.footprint,
            height: model.height,
            max_dim: model.max_dim,
        });
    }
}
