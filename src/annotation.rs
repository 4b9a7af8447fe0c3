//! Annotated fly points
//!
//! An ordered collection of user-marked points, each tagged with a logical
//! group label ("tube"). Insertion order is the row order of the output
//! table. The store knows nothing about calibration; the gate that rejects
//! points before calibration lives in the session layer.

use crate::geometry::Point;

/// Unique identifier for an annotation
///
/// Assigned monotonically at creation time and never reused, even after
/// removal, so selection and removal by id stay unambiguous.
pub type AnnotationId = u64;

/// Group label applied before the operator picks one
pub const DEFAULT_GROUP: &str = "Tube 1";

/// A user-marked point with its group label
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    /// Stable unique identifier
    id: AnnotationId,

    /// Marked position in pixel coordinates
    position: Point,

    /// Group ("tube") label, fixed at insertion time
    group: String,
}

impl Annotation {
    fn new(id: AnnotationId, position: Point, group: String) -> Self {
        Self {
            id,
            position,
            group,
        }
    }

    /// Get the annotation ID
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// Get the marked position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Get the group label
    pub fn group(&self) -> &str {
        &self.group
    }
}

/// Ordered collection of annotations
///
/// Preserves insertion order and hands out monotonically increasing ids.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_id: AnnotationId,
    current_group: String,
}

impl AnnotationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 0,
            current_group: DEFAULT_GROUP.to_string(),
        }
    }

    /// Add a point under the current group
    ///
    /// Returns the newly created annotation.
    pub fn add(&mut self, position: Point) -> &Annotation {
        let group = self.current_group.clone();
        self.add_with_group(position, group)
    }

    /// Add a point under an explicit group label
    pub fn add_with_group(&mut self, position: Point, group: impl Into<String>) -> &Annotation {
        let index = self.annotations.len();
        self.annotations
            .push(Annotation::new(self.next_id, position, group.into()));
        self.next_id += 1;
        &self.annotations[index]
    }

    /// Remove an annotation by id
    ///
    /// Returns the removed annotation, or `None` if the id is unknown
    /// (a no-op that leaves the store unchanged).
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Get an annotation by id
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// All annotations in insertion order
    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Change the group label applied to subsequently added points
    ///
    /// Existing annotations keep the label they were created under.
    pub fn set_current_group(&mut self, label: impl Into<String>) {
        self.current_group = label.into();
    }

    /// Get the current group label
    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    /// Get count of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove all annotations
    ///
    /// The id counter is not reset: ids stay unique for the whole session.
    pub fn clear(&mut self) {
        self.annotations.clear();
    }
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_monotonic() {
        let mut store = AnnotationStore::new();
        let a = store.add(Point::new(1.0, 1.0)).id();
        let b = store.add(Point::new(2.0, 2.0)).id();
        let c = store.add(Point::new(3.0, 3.0)).id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut store = AnnotationStore::new();
        let first = store.add(Point::new(1.0, 1.0)).id();
        let second = store.add(Point::new(2.0, 2.0)).id();

        store.remove(second);
        let third = store.add(Point::new(3.0, 3.0)).id();
        assert!(third > second);
        assert!(store.get(second).is_none());
        assert!(store.get(first).is_some());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = AnnotationStore::new();
        store.add(Point::new(1.0, 0.0));
        store.add(Point::new(2.0, 0.0));
        store.add(Point::new(3.0, 0.0));
        store.remove(1);
        store.add(Point::new(4.0, 0.0));

        let xs: Vec<f32> = store.all().iter().map(|a| a.position().x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = AnnotationStore::new();
        store.add(Point::new(1.0, 1.0));
        let before: Vec<Annotation> = store.all().to_vec();

        assert!(store.remove(999).is_none());
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_group_defaults_and_relabel() {
        let mut store = AnnotationStore::new();
        assert_eq!(store.current_group(), DEFAULT_GROUP);

        store.set_current_group("A");
        store.add(Point::new(1.0, 1.0));
        store.add(Point::new(2.0, 2.0));
        store.set_current_group("B");
        store.add(Point::new(3.0, 3.0));

        let groups: Vec<&str> = store.all().iter().map(|a| a.group()).collect();
        assert_eq!(groups, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_explicit_group_does_not_touch_current() {
        let mut store = AnnotationStore::new();
        store.add_with_group(Point::new(1.0, 1.0), "other");
        assert_eq!(store.current_group(), DEFAULT_GROUP);
        assert_eq!(store.all()[0].group(), "other");
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut store = AnnotationStore::new();
        store.add(Point::new(1.0, 1.0));
        store.add(Point::new(2.0, 2.0));
        store.clear();
        assert!(store.is_empty());

        let next = store.add(Point::new(3.0, 3.0)).id();
        assert_eq!(next, 2);
    }

    #[test]
    fn test_store_serde_roundtrip() {
        let mut store = AnnotationStore::new();
        store.set_current_group("Tube 7");
        store.add(Point::new(1.0, 2.0));
        store.add(Point::new(3.0, 4.0));

        let json = serde_json::to_string(&store).unwrap();
        let back: AnnotationStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.all(), store.all());
        assert_eq!(back.current_group(), "Tube 7");

        // The counter survives the round trip, so ids stay unique
        let mut back = back;
        assert_eq!(back.add(Point::new(5.0, 6.0)).id(), 2);
    }
}
