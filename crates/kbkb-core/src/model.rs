//! Plain snapshot data handed over by the cluster client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A worker node. Only used to order the board's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node name.
    pub name: String,
    /// When the node joined the cluster.
    pub creation_timestamp: DateTime<Utc>,
}

impl Node {
    /// Create a node.
    #[must_use]
    pub fn new(name: impl Into<String>, creation_timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            creation_timestamp,
        }
    }
}

/// Readiness of one container inside a workload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// Container name.
    #[serde(default)]
    pub name: String,
    /// Whether the container passes its readiness check.
    #[serde(default)]
    pub ready: bool,
}

impl ContainerStatus {
    /// Create a container status.
    #[must_use]
    pub fn new(name: impl Into<String>, ready: bool) -> Self {
        Self {
            name: name.into(),
            ready,
        }
    }
}

/// A unit of scheduled work, e.g. a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Workload name.
    pub name: String,
    /// When the workload was created.
    pub creation_timestamp: DateTime<Utc>,
    /// Node the workload is assigned to; `None` while unscheduled.
    #[serde(default)]
    pub node_name: Option<String>,
    /// Health sub-components.
    #[serde(default)]
    pub container_statuses: Vec<ContainerStatus>,
    /// Free-form annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// Identifying labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Workload {
    /// Create an unscheduled workload with no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, creation_timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            creation_timestamp,
            node_name: None,
            container_statuses: Vec::new(),
            annotations: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Assign the workload to a node.
    #[must_use]
    pub fn on_node(mut self, node: impl Into<String>) -> Self {
        self.node_name = Some(node.into());
        self
    }

    /// Add a container status.
    #[must_use]
    pub fn with_container(mut self, name: impl Into<String>, ready: bool) -> Self {
        self.container_statuses.push(ContainerStatus::new(name, ready));
        self
    }

    /// Add an annotation.
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Whether the workload has a non-empty node assignment.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.node_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}
