//! Config layer: the YAML input document, deserialized once and never mutated.
//!
//! This module is intentionally separate from compilation and rendering.
//! It owns:
//! - axis records (cloud provider, image, k8s version, test suite, common)
//! - job records keyed by job name
//! - the top-level document that ties them together

pub mod axis;
pub mod job;

pub use axis::{
    CloudProvider, Common, ComputeResources, Image, K8sVersion, NodeK8sVersion, Resources, TestSuite,
};
pub use job::JobSpec;

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Top-level input document.
///
/// YAML shape:
/// ```yaml
/// jobs:
///   ci-kubernetes-e2e-gce-cos-ver1.29-default:
///     interval: 2h
///     releaseBlocking: true
/// cloudProviders:
///   gce: { args: ["--provider=gce"] }
/// images:
///   cos: { args: ["--image-family=cos"], testgrid_prefix: google }
/// k8sVersions:
///   "1.29": { version: "1.29", args: ["--extract=ci/latest-1.29"] }
/// testSuites:
///   default: { args: ["--timeout=120m"] }
/// common:
///   args: ["--check-leaked-resources"]
/// ```
///
/// Every map is optional; a missing map behaves like an empty one. Unknown
/// keys (`nodeImages`, `nodeTestSuites`, `nodeCommon`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default)]
    pub jobs: BTreeMap<String, JobSpec>,

    #[serde(default)]
    pub cloud_providers: BTreeMap<String, CloudProvider>,

    #[serde(default)]
    pub images: BTreeMap<String, Image>,

    #[serde(default)]
    pub k8s_versions: BTreeMap<String, K8sVersion>,

    #[serde(default)]
    pub node_k8s_versions: BTreeMap<String, NodeK8sVersion>,

    #[serde(default)]
    pub test_suites: BTreeMap<String, TestSuite>,

    #[serde(default)]
    pub common: Common,
}

impl ConfigDocument {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("parse config document")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Job names in the order they are compiled.
    pub fn sorted_job_names(&self) -> Vec<&str> {
        // BTreeMap keys are already ordered; collected once so callers never
        // depend on map iteration order directly.
        self.jobs.keys().map(String::as_str).collect()
    }
}
