//! Cluster snapshots read from `kubectl get pods,nodes -o json|yaml` output.
//!
//! Both a mixed `List` (items carry their own `kind`) and typed
//! `PodList`/`NodeList` documents are accepted. Only the fields the board
//! needs are read; everything else is ignored.

use chrono::{DateTime, Utc};
use kbkb_core::{ContainerStatus, Node, Workload};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a snapshot.
#[derive(Debug, Error)]
pub(crate) enum SnapshotError {
    /// File or stdin could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed JSON.
    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML.
    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    items: Vec<Object>,
}

#[derive(Debug, Deserialize)]
struct Object {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    spec: Spec,
    #[serde(default)]
    status: Status,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMeta {
    #[serde(default)]
    name: String,
    #[serde(default)]
    creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    annotations: Option<BTreeMap<String, String>>,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spec {
    #[serde(default)]
    node_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Status {
    #[serde(default)]
    container_statuses: Option<Vec<ContainerStatus>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Pod,
    Node,
    Other,
}

impl Kind {
    fn of(item: Option<&str>, list: Option<&str>) -> Self {
        match item.or_else(|| list.and_then(|l| l.strip_suffix("List"))) {
            Some("Pod") => Self::Pod,
            Some("Node") => Self::Node,
            _ => Self::Other,
        }
    }
}

/// Nodes and scheduled workloads observed at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) nodes: Vec<Node>,
    pub(crate) workloads: Vec<Workload>,
}

impl Snapshot {
    /// Parse a JSON document.
    pub(crate) fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        let list: ObjectList = serde_json::from_str(s)?;
        Ok(Self::from_list(list))
    }

    /// Parse a YAML document.
    pub(crate) fn from_yaml_str(s: &str) -> Result<Self, SnapshotError> {
        let list: ObjectList = serde_yaml_ng::from_str(s)?;
        Ok(Self::from_list(list))
    }

    /// Read one file. `.json` files are parsed as JSON, everything else as
    /// YAML.
    pub(crate) fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, SnapshotError> {
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_str(contents)
        } else {
            Self::from_yaml_str(contents)
        }
    }

    fn merge(&mut self, part: Self) {
        self.nodes.extend(part.nodes);
        self.workloads.extend(part.workloads);
    }

    fn from_list(list: ObjectList) -> Self {
        let mut snapshot = Self::default();
        let mut unscheduled = 0usize;
        for item in list.items {
            let created = item.metadata.creation_timestamp.unwrap_or_default();
            match Kind::of(item.kind.as_deref(), list.kind.as_deref()) {
                Kind::Node => snapshot.nodes.push(Node::new(item.metadata.name, created)),
                Kind::Pod => {
                    let workload = Workload {
                        name: item.metadata.name,
                        creation_timestamp: created,
                        node_name: item.spec.node_name,
                        container_statuses: item.status.container_statuses.unwrap_or_default(),
                        annotations: item.metadata.annotations.unwrap_or_default(),
                        labels: item.metadata.labels.unwrap_or_default(),
                    };
                    if workload.is_scheduled() {
                        snapshot.workloads.push(workload);
                    } else {
                        unscheduled += 1;
                    }
                }
                Kind::Other => {}
            }
        }
        tracing::debug!(
            nodes = snapshot.nodes.len(),
            workloads = snapshot.workloads.len(),
            unscheduled,
            "snapshot parsed"
        );
        snapshot
    }
}

/// The snapshot paths given on the command line, re-read on every refresh.
///
/// `-` reads stdin. A pipe can only be drained once, so its contents are
/// kept after the first read and parsed again on later refreshes.
#[derive(Debug)]
pub(crate) struct SnapshotSource<R> {
    paths: Vec<PathBuf>,
    stdin: R,
    piped: Option<String>,
}

impl SnapshotSource<io::Stdin> {
    /// Source reading `-` from the process's stdin.
    pub(crate) fn new(paths: Vec<PathBuf>) -> Self {
        Self::with_stdin(paths, io::stdin())
    }
}

impl<R: Read> SnapshotSource<R> {
    /// Source reading `-` from `stdin`.
    pub(crate) fn with_stdin(paths: Vec<PathBuf>, stdin: R) -> Self {
        Self {
            paths,
            stdin,
            piped: None,
        }
    }

    /// Read and merge every path, e.g. separate pod and node dumps.
    pub(crate) fn load(&mut self) -> Result<Snapshot, SnapshotError> {
        let mut merged = Snapshot::default();
        for path in &self.paths {
            let part = if path.as_path() == Path::new("-") {
                if self.piped.is_none() {
                    let mut buf = String::new();
                    self.stdin
                        .read_to_string(&mut buf)
                        .map_err(|source| SnapshotError::Io {
                            path: path.clone(),
                            source,
                        })?;
                    self.piped = Some(buf);
                }
                Snapshot::from_yaml_str(self.piped.as_deref().unwrap_or_default())?
            } else {
                Snapshot::load(path)?
            };
            merged.merge(part);
        }
        Ok(merged)
    }
}
