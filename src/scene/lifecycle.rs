//! Clone lifecycle: generation-stamped loads, supersession, and
//! exactly-once disposal ordering.
//!
//! Every load request gets a monotonically increasing generation. A decode
//! that resolves after a newer request began is superseded and discarded
//! without touching the winner's resources. Installation order is strict:
//! the replacement clone is fully built first, then the previous clone is
//! disposed (exactly once), then the replacement becomes current.

use super::DisplayClone;
use crate::asset::SceneGraph;

/// Token identifying one in-flight load. Returned by
/// [`LifecycleManager::begin_load`] and redeemed on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
    address: String,
}

impl LoadToken {
    /// The asset-identity generation stamped on this load.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The asset address this load resolves.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Running totals for disposal bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposeStats {
    /// Clones whose resources were disposed.
    pub disposed: u64,
    /// Dispose calls that found the clone already disposed.
    pub double_dispose_blocked: u64,
}

/// Result of installing a resolved load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The clone was installed; carries the address of the clone it
    /// replaced, if any (so the caller can release its cache reference).
    Installed(Option<String>),
    /// A newer load superseded this one; nothing was installed or disposed.
    Superseded,
}

/// Owns the current display clone and the in-flight load bookkeeping.
#[derive(Default)]
pub struct LifecycleManager {
    current: Option<DisplayClone>,
    current_address: Option<String>,
    pending: Option<(u64, String)>,
    next_generation: u64,
    stats: DisposeStats,
}

impl LifecycleManager {
    /// Create an empty manager with nothing displayed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a load for `address`. Any load already in flight is implicitly
    /// superseded: its token will no longer install.
    pub fn begin_load(&mut self, address: &str) -> LoadToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        if let Some((stale, stale_addr)) = self
            .pending
            .replace((generation, address.to_owned()))
        {
            log::debug!(
                "load gen {stale} ({stale_addr}) superseded by gen {generation}"
            );
        }
        LoadToken {
            generation,
            address: address.to_owned(),
        }
    }

    /// Whether a load is currently in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `token` is still the load that will install.
    #[must_use]
    pub fn is_current(&self, token: &LoadToken) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(gen, _)| *gen == token.generation)
    }

    /// Install the clone for a resolved load.
    ///
    /// Builds the replacement clone first, then disposes the previous clone
    /// (exactly once), then installs. Superseded tokens install nothing.
    pub fn install(
        &mut self,
        token: &LoadToken,
        graph: &SceneGraph,
    ) -> InstallOutcome {
        if !self.is_current(token) {
            log::debug!(
                "discarding superseded load gen {} ({})",
                token.generation,
                token.address
            );
            return InstallOutcome::Superseded;
        }
        self.pending = None;

        // The replacement must be fully ready before anything is disposed.
        let replacement = DisplayClone::from_graph(graph, token.generation);

        let replaced = self.current_address.take();
        if let Some(mut old) = self.current.take() {
            self.dispose_clone(&mut old);
        }

        self.current = Some(replacement);
        self.current_address = Some(token.address.clone());
        log::debug!(
            "installed clone gen {} ({})",
            token.generation,
            token.address
        );
        InstallOutcome::Installed(replaced)
    }

    /// Record a failed load. Returns `true` when the failure belongs to the
    /// current in-flight load (and should surface to the host); superseded
    /// failures are silently discarded.
    pub fn fail(&mut self, token: &LoadToken) -> bool {
        if self.is_current(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Dispose the current clone and clear it. Returns the address whose
    /// cache reference should be released.
    pub fn teardown(&mut self) -> Option<String> {
        if let Some(mut clone) = self.current.take() {
            self.dispose_clone(&mut clone);
        }
        self.current_address.take()
    }

    fn dispose_clone(&mut self, clone: &mut DisplayClone) {
        if clone.dispose() {
            self.stats.disposed += 1;
        } else {
            self.stats.double_dispose_blocked += 1;
        }
    }

    /// The currently displayed clone.
    #[must_use]
    pub fn current(&self) -> Option<&DisplayClone> {
        self.current.as_ref()
    }

    /// Mutable access to the currently displayed clone.
    pub fn current_mut(&mut self) -> Option<&mut DisplayClone> {
        self.current.as_mut()
    }

    /// Address of the currently displayed asset.
    #[must_use]
    pub fn current_address(&self) -> Option<&str> {
        self.current_address.as_deref()
    }

    /// Disposal bookkeeping totals.
    #[must_use]
    pub fn stats(&self) -> DisposeStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::test_support::box_graph;

    #[test]
    fn test_install_replaces_and_disposes_previous() {
        let mut mgr = LifecycleManager::new();
        let graph = box_graph(Vec3::ONE, 1);

        let t1 = mgr.begin_load("a.glb");
        assert_eq!(mgr.install(&t1, &graph), InstallOutcome::Installed(None));
        assert_eq!(mgr.stats().disposed, 0);

        let t2 = mgr.begin_load("b.glb");
        assert_eq!(
            mgr.install(&t2, &graph),
            InstallOutcome::Installed(Some("a.glb".to_owned()))
        );
        // Exactly one disposal: the first clone, once.
        assert_eq!(mgr.stats().disposed, 1);
        assert_eq!(mgr.stats().double_dispose_blocked, 0);
        assert_eq!(mgr.current_address(), Some("b.glb"));
        assert_eq!(mgr.current().map(DisplayClone::generation), Some(2));
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut mgr = LifecycleManager::new();
        let graph = box_graph(Vec3::ONE, 1);

        let stale = mgr.begin_load("slow.glb");
        let fresh = mgr.begin_load("fast.glb");
        assert!(!mgr.is_current(&stale));

        // Fast load wins first.
        assert!(matches!(
            mgr.install(&fresh, &graph),
            InstallOutcome::Installed(None)
        ));

        // Slow load resolves late: discarded, winner untouched.
        assert_eq!(mgr.install(&stale, &graph), InstallOutcome::Superseded);
        assert_eq!(mgr.current_address(), Some("fast.glb"));
        assert!(mgr.current().is_some_and(|c| !c.is_disposed()));
        assert_eq!(mgr.stats().disposed, 0);
    }

    #[test]
    fn test_failure_of_superseded_load_is_silent() {
        let mut mgr = LifecycleManager::new();
        let stale = mgr.begin_load("bad.glb");
        let fresh = mgr.begin_load("good.glb");

        assert!(!mgr.fail(&stale));
        // The fresh load is still pending and installable.
        assert!(mgr.is_current(&fresh));
    }

    #[test]
    fn test_failure_of_current_load_clears_pending() {
        let mut mgr = LifecycleManager::new();
        let token = mgr.begin_load("bad.glb");
        assert!(mgr.fail(&token));
        assert!(!mgr.is_pending());
        assert!(mgr.current().is_none());
    }

    #[test]
    fn test_teardown_disposes_once() {
        let mut mgr = LifecycleManager::new();
        let graph = box_graph(Vec3::ONE, 1);
        let token = mgr.begin_load("a.glb");
        let _ = mgr.install(&token, &graph);

        assert_eq!(mgr.teardown(), Some("a.glb".to_owned()));
        assert_eq!(mgr.stats().disposed, 1);
        assert!(mgr.current().is_none());

        // Second teardown is a no-op.
        assert_eq!(mgr.teardown(), None);
        assert_eq!(mgr.stats().disposed, 1);
    }
}
