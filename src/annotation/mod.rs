//! Scene-anchored annotation markers.
//!
//! Annotation positions are recorded in the showroom's normalized frame
//! (the fitted model's coordinates), not tied to any one asset: they keep
//! their positions and titles across swaps. A hit picked while the entrance
//! animation is still running bakes in the transient entrance scale, since
//! the marker records the point exactly where the ray struck the surface.
//! Placement snaps coordinates to three decimals so saved annotations
//! serialize compactly and compare stably.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Marker color cycle, assigned by placement order.
pub const ANNOTATION_PALETTE: [[f32; 3]; 6] = [
    [0.231, 0.510, 0.965], // #3b82f6
    [0.937, 0.267, 0.267], // #ef4444
    [0.063, 0.725, 0.506], // #10b981
    [0.961, 0.620, 0.043], // #f59e0b
    [0.545, 0.361, 0.965], // #8b5cf6
    [0.925, 0.282, 0.600], // #ec4899
];

/// A single placed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Stable identifier, unique for the lifetime of the set.
    pub id: u64,
    /// Display index; re-packed after deletions.
    pub index: usize,
    /// World position, snapped to three decimals.
    pub position: [f32; 3],
    /// Display title, derived from the index.
    pub title: String,
    /// Palette color assigned at placement.
    pub color: [f32; 3],
}

/// Ordered collection of markers plus placement-mode state.
#[derive(Default)]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
    next_id: u64,
    active: Option<u64>,
    placement_mode: bool,
}

/// Snap each coordinate to three decimal places.
#[must_use]
pub fn round_position(v: Vec3) -> [f32; 3] {
    let snap = |x: f32| (x * 1000.0).round() / 1000.0;
    [snap(v.x), snap(v.y), snap(v.z)]
}

impl AnnotationSet {
    /// Empty set with placement mode off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed markers in display order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Number of placed markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether no markers are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Whether the next surface click places a marker.
    #[must_use]
    pub fn placement_mode(&self) -> bool {
        self.placement_mode
    }

    /// Arm or disarm placement mode.
    pub fn set_placement_mode(&mut self, on: bool) {
        self.placement_mode = on;
    }

    /// Id of the highlighted marker, if any.
    #[must_use]
    pub fn active(&self) -> Option<u64> {
        self.active
    }

    /// Place a marker at `position` if placement mode is armed. Placement
    /// disarms the mode and highlights the new marker.
    pub fn try_place(&mut self, position: Vec3) -> Option<&Annotation> {
        if !self.placement_mode {
            return None;
        }
        self.placement_mode = false;

        let index = self.annotations.len();
        let id = self.next_id;
        self.next_id += 1;
        let annotation = Annotation {
            id,
            index,
            position: round_position(position),
            title: format!("Point {}", index + 1),
            color: ANNOTATION_PALETTE[index % ANNOTATION_PALETTE.len()],
        };
        log::debug!("placed annotation {} at {:?}", id, annotation.position);
        self.annotations.push(annotation);
        self.active = Some(id);
        self.annotations.last()
    }

    /// Remove a marker by id, re-packing indices and re-deriving titles for
    /// the markers that remain. Returns `false` for unknown ids.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(pos) = self.annotations.iter().position(|a| a.id == id)
        else {
            return false;
        };
        let _ = self.annotations.remove(pos);
        for (index, annotation) in self.annotations.iter_mut().enumerate() {
            annotation.index = index;
            annotation.title = format!("Point {}", index + 1);
        }
        if self.active == Some(id) {
            self.active = None;
        }
        true
    }

    /// Highlight a marker, or un-highlight if already active.
    pub fn toggle_active(&mut self, id: u64) {
        if self.annotations.iter().all(|a| a.id != id) {
            return;
        }
        self.active = if self.active == Some(id) { None } else { Some(id) };
    }

    /// Serialize the markers to JSON for host-side persistence.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.annotations)
    }

    /// Replace the markers with a previously exported JSON payload.
    /// Highlight and placement state reset; id allocation resumes past the
    /// highest restored id.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error.
    pub fn restore_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let annotations: Vec<Annotation> = serde_json::from_str(json)?;
        self.next_id = annotations
            .iter()
            .map(|a| a.id + 1)
            .max()
            .unwrap_or(0);
        self.annotations = annotations;
        self.active = None;
        self.placement_mode = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> AnnotationSet {
        let mut set = AnnotationSet::new();
        set.set_placement_mode(true);
        set
    }

    #[test]
    fn test_placement_requires_armed_mode() {
        let mut set = AnnotationSet::new();
        assert!(set.try_place(Vec3::ONE).is_none());
        assert!(set.is_empty());

        set.set_placement_mode(true);
        assert!(set.try_place(Vec3::ONE).is_some());
        // Placement disarms the mode.
        assert!(!set.placement_mode());
        assert!(set.try_place(Vec3::ONE).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_position_rounds_to_three_decimals() {
        let mut set = armed();
        let placed = set
            .try_place(Vec3::new(0.123_45, -1.999_9, 2.0004))
            .unwrap();
        assert_eq!(placed.position, [0.123, -2.0, 2.0]);
    }

    #[test]
    fn test_titles_and_palette_cycle() {
        let mut set = AnnotationSet::new();
        for i in 0..8 {
            set.set_placement_mode(true);
            let placed = set.try_place(Vec3::splat(i as f32)).unwrap();
            assert_eq!(placed.title, format!("Point {}", i + 1));
        }
        assert_eq!(set.annotations()[0].color, ANNOTATION_PALETTE[0]);
        assert_eq!(set.annotations()[6].color, ANNOTATION_PALETTE[0]);
        assert_eq!(set.annotations()[7].color, ANNOTATION_PALETTE[1]);
    }

    #[test]
    fn test_delete_repacks_indices_and_titles() {
        let mut set = AnnotationSet::new();
        for i in 0..3 {
            set.set_placement_mode(true);
            let _ = set.try_place(Vec3::splat(i as f32));
        }
        let middle = set.annotations()[1].id;
        assert!(set.delete(middle));
        assert!(!set.delete(middle));

        assert_eq!(set.len(), 2);
        assert_eq!(set.annotations()[0].title, "Point 1");
        assert_eq!(set.annotations()[1].title, "Point 2");
        assert_eq!(set.annotations()[1].index, 1);
        // Ids stay stable across re-packing; colors keep placement order.
        assert_eq!(set.annotations()[1].position, [2.0, 2.0, 2.0]);
        assert_eq!(set.annotations()[1].color, ANNOTATION_PALETTE[2]);
    }

    #[test]
    fn test_json_round_trip_resumes_ids() {
        let mut set = AnnotationSet::new();
        for i in 0..3 {
            set.set_placement_mode(true);
            let _ = set.try_place(Vec3::splat(i as f32));
        }
        let last = set.annotations()[2].id;
        assert!(set.delete(set.annotations()[0].id));
        let json = set.to_json().unwrap();

        let mut restored = AnnotationSet::new();
        restored.restore_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.annotations()[1].title, "Point 2");
        assert!(!restored.placement_mode());

        // New ids never collide with restored ones.
        restored.set_placement_mode(true);
        let fresh = restored.try_place(Vec3::ZERO).unwrap();
        assert!(fresh.id > last);
    }

    #[test]
    fn test_active_toggles_and_clears_on_delete() {
        let mut set = armed();
        let id = set.try_place(Vec3::ZERO).unwrap().id;
        assert_eq!(set.active(), Some(id));
        set.toggle_active(id);
        assert_eq!(set.active(), None);
        set.toggle_active(id);
        assert_eq!(set.active(), Some(id));
        assert!(set.delete(id));
        assert_eq!(set.active(), None);
        // Unknown ids are ignored.
        set.toggle_active(42);
        assert_eq!(set.active(), None);
    }
}
