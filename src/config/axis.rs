//! Axis records: one shape per axis kind.
//!
//! Every record is `Default` because a key missing from its axis map resolves
//! to the zero value rather than an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CloudProvider {
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub args: Vec<String>,

    /// Dashboard name prefix; empty means "no image-specific dashboard".
    #[serde(default)]
    pub testgrid_prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct K8sVersion {
    #[serde(default)]
    pub args: Vec<String>,

    /// Release version used in `sig-release-<version>-*` dashboard names.
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeK8sVersion {
    #[serde(default)]
    pub args: Vec<String>,

    /// Replaces the default container image when non-empty.
    #[serde(default)]
    pub prow_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestSuite {
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub resources: Resources,

    #[serde(default)]
    pub cluster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Common {
    #[serde(default)]
    pub args: Vec<String>,

    /// Not consumed by any stage; only the image prefix names dashboards.
    #[serde(default)]
    #[allow(dead_code)]
    pub testgrid_prefix: String,
}

/// Container compute resources, shared by input and output documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resources {
    #[serde(default)]
    pub requests: ComputeResources,

    #[serde(default)]
    pub limits: ComputeResources,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComputeResources {
    #[serde(default)]
    pub cpu: String,

    #[serde(default)]
    pub memory: String,
}

impl ComputeResources {
    pub fn new(cpu: &str, memory: &str) -> Self {
        Self {
            cpu: cpu.to_string(),
            memory: memory.to_string(),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.cpu.is_empty() || !self.memory.is_empty()
    }
}

impl Resources {
    /// A resources block only counts as set when both requests and limits
    /// carry at least one value; anything less falls through to the next
    /// source.
    pub fn is_present(&self) -> bool {
        self.requests.is_present() && self.limits.is_present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_presence() {
        assert!(!Resources::default().is_present());

        let only_limit = Resources {
            requests: ComputeResources::default(),
            limits: ComputeResources::new("", "1Gi"),
        };
        assert!(!only_limit.is_present());

        let partial_both = Resources {
            requests: ComputeResources::new("2", ""),
            limits: ComputeResources::new("", "1Gi"),
        };
        assert!(partial_both.is_present());
    }
}
