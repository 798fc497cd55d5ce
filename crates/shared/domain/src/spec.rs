//! Service specification tree.
//!
//! A [`ServiceSpec`] owns pods, pods own tasks, tasks own config file templates.
//! The tree is produced by the specification loader and consumed read-only.
//! Keys (`type` for pods, `name` for tasks and config files) are expected to be
//! unique within their parent, but nothing here enforces it.

use serde::{Deserialize, Serialize};

/// Root of one service specification snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub name: String,
    #[serde(default)]
    pub pods: Vec<PodSpec>,
}

/// A named group of co-located tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(rename = "type")]
    pub pod_type: String,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

/// A unit of work within a pod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    pub name: String,
    #[serde(default)]
    pub config_files: Vec<ConfigFileSpec>,
}

/// A raw, unrendered configuration template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFileSpec {
    pub name: String,
    /// Destination of the rendered file inside the task sandbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    pub template_content: String,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, pods: impl IntoIterator<Item = PodSpec>) -> Self {
        Self { name: name.into(), pods: pods.into_iter().collect() }
    }
}

impl PodSpec {
    pub fn new(pod_type: impl Into<String>, tasks: impl IntoIterator<Item = TaskSpec>) -> Self {
        Self { pod_type: pod_type.into(), tasks: tasks.into_iter().collect() }
    }
}

impl TaskSpec {
    pub fn new(
        name: impl Into<String>,
        config_files: impl IntoIterator<Item = ConfigFileSpec>,
    ) -> Self {
        Self { name: name.into(), config_files: config_files.into_iter().collect() }
    }
}

impl ConfigFileSpec {
    pub fn new(name: impl Into<String>, template_content: impl Into<String>) -> Self {
        Self { name: name.into(), relative_path: None, template_content: template_content.into() }
    }

    #[must_use]
    pub fn with_relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }
}
