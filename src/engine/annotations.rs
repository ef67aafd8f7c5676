//! Annotation placement and management.

use super::{ShowroomEngine, ShowroomEvent};
use crate::picking::{intersect_clone, Ray};

impl ShowroomEngine {
    /// Placed markers in display order.
    #[must_use]
    pub fn annotations(&self) -> &crate::annotation::AnnotationSet {
        &self.annotations
    }

    /// Arm or disarm placement mode. While armed, orbit input is ignored
    /// and the next surface hit places a marker.
    pub fn set_placement_mode(&mut self, on: bool) {
        self.annotations.set_placement_mode(on);
    }

    /// Whether the next surface click places a marker.
    #[must_use]
    pub fn placement_mode(&self) -> bool {
        self.annotations.placement_mode()
    }

    /// Cast `ray` at the displayed model and place a marker at the nearest
    /// hit. Does nothing while placement mode is off, no model is shown, or
    /// the ray misses.
    pub fn place_annotation(&mut self, ray: &Ray) -> Option<u64> {
        if !self.annotations.placement_mode() {
            return None;
        }
        let clone = self.lifecycle.current()?;
        let hit = intersect_clone(ray, clone)?;
        let placed = self.annotations.try_place(hit.point)?;
        let (id, position) = (placed.id, placed.position);
        self.push_event(ShowroomEvent::AnnotationAdded { id, position });
        Some(id)
    }

    /// Delete a marker by id.
    pub fn delete_annotation(&mut self, id: u64) -> bool {
        if self.annotations.delete(id) {
            self.push_event(ShowroomEvent::AnnotationDeleted { id });
            true
        } else {
            false
        }
    }

    /// Highlight a marker, or clear the highlight if already active.
    pub fn toggle_annotation(&mut self, id: u64) {
        self.annotations.toggle_active(id);
    }

    /// Serialize the markers for host-side persistence.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error.
    pub fn export_annotations(&self) -> Result<String, serde_json::Error> {
        self.annotations.to_json()
    }

    /// Restore markers from a previously exported payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error.
    pub fn restore_annotations(
        &mut self,
        json: &str,
    ) -> Result<(), serde_json::Error> {
        self.annotations.restore_json(json)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;

    use crate::engine::{ShowroomEngine, ShowroomEvent};
    use crate::options::ViewerOptions;
    use crate::picking::Ray;
    use crate::scene::test_support::box_graph;

    fn engine_with_model() -> ShowroomEngine {
        let mut engine = ShowroomEngine::new(ViewerOptions::default(), 1.6);
        let token = engine.request_display("models/a.glb");
        engine.finish_load(&token, Arc::new(box_graph(Vec3::ONE, 1)));
        let _ = engine.drain_events();
        engine
    }

    // Unit box normalized to TARGET_SIZE spans z in [-1, 1] shifted to the
    // floor; aim at its front face through the vertical center.
    fn front_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.8, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_placement_requires_mode_and_hit() {
        let mut engine = engine_with_model();
        assert!(engine.place_annotation(&front_ray()).is_none());

        engine.set_placement_mode(true);
        let miss = Ray::new(Vec3::new(50.0, 0.8, 5.0), Vec3::NEG_Z);
        assert!(engine.place_annotation(&miss).is_none());
        // A miss leaves placement mode armed.
        assert!(engine.placement_mode());

        let id = engine.place_annotation(&front_ray()).unwrap();
        assert!(!engine.placement_mode());
        let events = engine.drain_events();
        assert!(matches!(
            events.as_slice(),
            [ShowroomEvent::AnnotationAdded { id: e, .. }] if *e == id
        ));
    }

    #[test]
    fn test_annotations_survive_model_swap() {
        let mut engine = engine_with_model();
        engine.set_placement_mode(true);
        let _ = engine.place_annotation(&front_ray()).unwrap();

        let token = engine.request_display("models/b.glb");
        engine.finish_load(&token, Arc::new(box_graph(Vec3::splat(3.0), 1)));
        assert_eq!(engine.annotations().len(), 1);
        assert_eq!(engine.annotations().annotations()[0].title, "Point 1");
    }

    #[test]
    fn test_delete_emits_event_once() {
        let mut engine = engine_with_model();
        engine.set_placement_mode(true);
        let id = engine.place_annotation(&front_ray()).unwrap();
        let _ = engine.drain_events();

        assert!(engine.delete_annotation(id));
        assert!(!engine.delete_annotation(id));
        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![ShowroomEvent::AnnotationDeleted { id }]
        );
    }

    #[test]
    fn test_placed_position_lies_on_surface() {
        let mut engine = engine_with_model();
        engine.set_placement_mode(true);
        let _ = engine.place_annotation(&front_ray()).unwrap();
        let pos = engine.annotations().annotations()[0].position;
        // Normalized unit box front face sits at z = 1 (entrance scale 0.8
        // pulls it to 0.8 at t = 0).
        assert!((pos[2] - 0.8).abs() < 1e-3);
        assert!((pos[0]).abs() < 1e-3);
    }
}
