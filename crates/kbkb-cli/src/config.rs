//! YAML configuration for kbkb.

use kbkb_core::{ClassifierKind, StabilityGate, DEFAULT_COLOR_ANNOTATION};
use kbkb_terminal::{CharSet, CharsetPreset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a config file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Board settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct KbkbConfig {
    /// Color strategy.
    pub(crate) classifier: ClassifierKind,
    /// Annotation read by the annotation classifier.
    pub(crate) annotation_key: String,
    /// Built-in glyph set.
    pub(crate) charset: CharsetPreset,
    /// Full glyph set, replacing `charset` when present.
    pub(crate) custom_charset: Option<CharSet>,
    /// Minimum region size to count as erasable.
    pub(crate) threshold: usize,
    /// Whether an unstable board suppresses erasable regions.
    pub(crate) gate: StabilityGate,
    /// Delay between refreshes.
    pub(crate) refresh_ms: u64,
}

impl Default for KbkbConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            annotation_key: DEFAULT_COLOR_ANNOTATION.to_string(),
            charset: CharsetPreset::default(),
            custom_charset: None,
            threshold: 4,
            gate: StabilityGate::default(),
            refresh_ms: 1000,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) classifier: Option<ClassifierKind>,
    pub(crate) annotation_key: Option<String>,
    pub(crate) charset: Option<CharsetPreset>,
    pub(crate) threshold: Option<usize>,
    pub(crate) require_stable: bool,
    pub(crate) refresh_ms: Option<u64>,
}

impl KbkbConfig {
    /// Parse YAML text.
    pub(crate) fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(s)?)
    }

    /// Read a config file.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Apply command-line overrides.
    pub(crate) fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(classifier) = overrides.classifier {
            self.classifier = classifier;
        }
        if let Some(key) = overrides.annotation_key {
            self.annotation_key = key;
        }
        if let Some(charset) = overrides.charset {
            self.charset = charset;
            self.custom_charset = None;
        }
        if let Some(threshold) = overrides.threshold {
            self.threshold = threshold;
        }
        if overrides.require_stable {
            self.gate = StabilityGate::RequireStableGrid;
        }
        if let Some(refresh_ms) = overrides.refresh_ms {
            self.refresh_ms = refresh_ms;
        }
    }

    /// Glyph set to draw with.
    pub(crate) fn charset(&self) -> CharSet {
        self.custom_charset
            .clone()
            .unwrap_or_else(|| self.charset.charset())
    }

    /// Default configuration as a commented YAML file.
    pub(crate) fn default_yaml() -> &'static str {
        r"# kbkb configuration file

# Color strategy: annotation (read a color annotation) or hash (hash the labels)
classifier: annotation

# Annotation holding the color when classifier is annotation
annotation_key: kbkb.k8s.omakenoyouna.net/color

# Glyphs: narrow (ASCII) or wide (double-width, Unicode icons)
charset: narrow

# Replace the preset entirely, e.g.:
# custom_charset:
#   stable_icon: '#'
#   unstable_icon: '.'
#   color_codes:
#     red: 91m

# Same-color neighbours needed before a group is erasable
threshold: 4

# always, or require-stable-grid to hide erasable groups during rollouts
gate: always

# Refresh interval in milliseconds
refresh_ms: 1000
"
    }
}
