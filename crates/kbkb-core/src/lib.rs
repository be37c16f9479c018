//! Grid model and connected-region analysis for the kbkb cluster board.
//!
//! A snapshot of cluster workloads is laid out as a board: one column per
//! node, one cell per workload, stacked in creation order. Cells are colored
//! by a pluggable [`Classifier`] and groups of same-colored neighbours that
//! reach a size threshold are reported as *erasable*, the way a
//! match-elimination puzzle clears its blocks.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use kbkb_core::{AnnotationClassifier, GridBuilder, Node, RegionAnalyzer, Workload};
//!
//! let t = |d| Utc.with_ymd_and_hms(2020, 8, d, 0, 0, 0).unwrap();
//! let nodes = vec![Node::new("node1", t(1)), Node::new("node2", t(2))];
//! let workloads = vec![
//!     Workload::new("a", t(3)).on_node("node1").with_annotation(kbkb_core::DEFAULT_COLOR_ANNOTATION, "red"),
//!     Workload::new("b", t(4)).on_node("node2").with_annotation(kbkb_core::DEFAULT_COLOR_ANNOTATION, "red"),
//! ];
//!
//! let grid = GridBuilder::new(AnnotationClassifier::default()).build(&workloads, &nodes);
//! let erasable = RegionAnalyzer::new(2).find_erasable(&grid);
//! assert_eq!(erasable.len(), 2);
//! ```

mod cell;
mod classifier;
mod error;
mod grid;
mod model;
mod region;

pub use cell::Cell;
pub use classifier::{
    AnnotationClassifier, Classifier, ClassifierKind, HashClassifier, DEFAULT_COLOR_ANNOTATION,
    HASH_PALETTE, SENTINEL_COLOR,
};
pub use error::KbkbError;
pub use grid::{CellPos, Column, Grid, GridBuilder};
pub use model::{ContainerStatus, Node, Workload};
pub use region::{find_erasable_regions, ErasableSet, Region, RegionAnalyzer, StabilityGate};
