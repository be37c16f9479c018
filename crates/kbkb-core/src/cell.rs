//! A workload placed on the board.

use crate::classifier::{Classifier, SENTINEL_COLOR};
use crate::model::Workload;

/// One workload with its derived color and health.
///
/// The color is computed once when the cell is created, since a grid only
/// lives for a single snapshot. Stability is derived on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    workload: Workload,
    color: String,
}

impl Cell {
    /// Classify `workload` and wrap it.
    pub fn new<C: Classifier + ?Sized>(workload: Workload, classifier: &C) -> Self {
        let color = classifier.classify(&workload);
        Self { workload, color }
    }

    /// True iff every container is ready. No containers means stable.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.workload.container_statuses.iter().all(|c| c.ready)
    }

    /// Color label assigned by the classifier.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether this cell carries the unclassified color.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.color == SENTINEL_COLOR
    }

    /// Workload name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.workload.name
    }

    /// Underlying workload.
    #[must_use]
    pub fn workload(&self) -> &Workload {
        &self.workload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{AnnotationClassifier, DEFAULT_COLOR_ANNOTATION};
    use chrono::{TimeZone, Utc};

    fn workload() -> Workload {
        Workload::new("pod", Utc.with_ymd_and_hms(2020, 9, 1, 0, 0, 0).unwrap()).on_node("n")
    }

    #[test]
    fn test_no_containers_is_stable() {
        let cell = Cell::new(workload(), &AnnotationClassifier::default());
        assert!(cell.is_stable());
    }

    #[test]
    fn test_all_ready_is_stable() {
        let w = workload().with_container("a", true).with_container("b", true);
        assert!(Cell::new(w, &AnnotationClassifier::default()).is_stable());
    }

    #[test]
    fn test_any_not_ready_is_unstable() {
        let w = workload().with_container("a", true).with_container("b", false);
        assert!(!Cell::new(w, &AnnotationClassifier::default()).is_stable());
    }

    #[test]
    fn test_color_from_classifier() {
        let w = workload().with_annotation(DEFAULT_COLOR_ANNOTATION, "green");
        let cell = Cell::new(w, &AnnotationClassifier::default());
        assert_eq!(cell.color(), "green");
        assert!(!cell.is_sentinel());
        assert_eq!(cell.name(), "pod");
    }

    #[test]
    fn test_unclassified_is_sentinel() {
        let cell = Cell::new(workload(), &AnnotationClassifier::default());
        assert_eq!(cell.color(), SENTINEL_COLOR);
        assert!(cell.is_sentinel());
    }
}
