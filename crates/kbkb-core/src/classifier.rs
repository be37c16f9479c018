//! Color classification strategies.
//!
//! A classifier maps a workload's metadata to a color label. Classification
//! never fails: missing or unusable metadata yields [`SENTINEL_COLOR`].

use crate::error::KbkbError;
use crate::model::Workload;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Color label meaning "unclassified". Never part of a region.
pub const SENTINEL_COLOR: &str = "white";

/// Annotation read by [`AnnotationClassifier::default`].
pub const DEFAULT_COLOR_ANNOTATION: &str = "kbkb.k8s.omakenoyouna.net/color";

/// Colors a [`HashClassifier`] can produce, indexed by digest value.
pub const HASH_PALETTE: [&str; 4] = ["red", "green", "yellow", "blue"];

/// Maps a workload to a color label.
pub trait Classifier {
    /// Color label for `workload`.
    fn classify(&self, workload: &Workload) -> String;

    /// Short strategy name for logs.
    fn name(&self) -> &'static str;
}

impl<T: Classifier + ?Sized> Classifier for Box<T> {
    fn classify(&self, workload: &Workload) -> String {
        (**self).classify(workload)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: Classifier + ?Sized> Classifier for &T {
    fn classify(&self, workload: &Workload) -> String {
        (**self).classify(workload)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Uses the literal value of a color annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationClassifier {
    key: String,
}

impl Default for AnnotationClassifier {
    fn default() -> Self {
        Self::with_key(DEFAULT_COLOR_ANNOTATION)
    }
}

impl AnnotationClassifier {
    /// Read colors from `key` instead of the default annotation.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Annotation key being read.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Classifier for AnnotationClassifier {
    fn classify(&self, workload: &Workload) -> String {
        match workload.annotations.get(&self.key) {
            Some(color) if !color.is_empty() => color.clone(),
            _ => SENTINEL_COLOR.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "annotation"
    }
}

/// Derives a stable color from the workload's label set.
///
/// Labels are serialized as a JSON object with sorted keys, hashed with
/// SHA-256, and the first two digest bytes (big-endian) select a palette
/// entry modulo [`HASH_PALETTE`]'s length. Workloads with equal label sets
/// always share a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashClassifier;

impl HashClassifier {
    /// Palette index for a label set, or `None` if it cannot be serialized.
    fn palette_index(workload: &Workload) -> Option<usize> {
        // BTreeMap serializes in key order.
        let canonical = serde_json::to_vec(&workload.labels).ok()?;
        let digest = Sha256::digest(&canonical);
        let value = u16::from_be_bytes([digest[0], digest[1]]);
        Some(usize::from(value) % HASH_PALETTE.len())
    }
}

impl Classifier for HashClassifier {
    fn classify(&self, workload: &Workload) -> String {
        Self::palette_index(workload)
            .map_or(SENTINEL_COLOR, |idx| HASH_PALETTE[idx])
            .to_string()
    }

    fn name(&self) -> &'static str {
        "hash"
    }
}

/// Named classifier strategies, selectable from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// [`AnnotationClassifier`].
    #[default]
    Annotation,
    /// [`HashClassifier`].
    Hash,
}

impl ClassifierKind {
    /// Instantiate the strategy. `annotation_key` is ignored by `Hash`.
    #[must_use]
    pub fn build(self, annotation_key: &str) -> Box<dyn Classifier> {
        match self {
            Self::Annotation => Box::new(AnnotationClassifier::with_key(annotation_key)),
            Self::Hash => Box::new(HashClassifier),
        }
    }
}

impl FromStr for ClassifierKind {
    type Err = KbkbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annotation" | "annotated" => Ok(Self::Annotation),
            "hash" | "hashed" => Ok(Self::Hash),
            other => Err(KbkbError::UnknownClassifier(other.to_string())),
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotation => write!(f, "annotation"),
            Self::Hash => write!(f, "hash"),
        }
    }
}
