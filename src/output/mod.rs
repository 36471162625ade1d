//! Output model: generated periodic jobs and dashboard test groups.
//!
//! These types only exist to be serialized; nothing reads them back.

use crate::config::Resources;
use serde::Serialize;
use std::collections::BTreeMap;

pub const ANNOTATION_TAB_NAME: &str = "testgrid-tab-name";
pub const ANNOTATION_DASHBOARDS: &str = "testgrid-dashboards";
pub const ANNOTATION_NUM_FAILURES_TO_ALERT: &str = "testgrid-num-failures-to-alert";

/// Exactly one of interval or cron.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Interval(String),
    Cron(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Periodic {
    pub name: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub schedule: Schedule,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster: String,
    pub labels: BTreeMap<String, String>,
    pub decorate: bool,
    pub decoration_config: DecorationConfig,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationConfig {
    pub timeout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodSpec {
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub image: String,
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub resources: Resources,
}

#[cfg(test)]
impl Periodic {
    /// The single container every generated job runs.
    pub fn container(&self) -> Option<&Container> {
        self.spec.containers.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestGroup {
    pub name: String,
    pub gcs_prefix: String,
    pub column_header: Vec<ColumnHeader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    pub configuration_value: String,
}

/// Everything produced by one compilation run, in sorted job-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub periodics: Vec<Periodic>,
    pub test_groups: Vec<TestGroup>,
    /// `job: axis=key` for every axis key that fell back to empty defaults.
    pub unresolved_axes: Vec<String>,
}

/// Document consumed by the CI scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodicsDocument<'a> {
    pub periodics: &'a [Periodic],
}

/// Document consumed by the results dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct TestGroupsDocument<'a> {
    pub test_groups: &'a [TestGroup],
}

impl Batch {
    pub fn periodics_document(&self) -> PeriodicsDocument<'_> {
        PeriodicsDocument {
            periodics: &self.periodics,
        }
    }

    pub fn test_groups_document(&self) -> TestGroupsDocument<'_> {
        TestGroupsDocument {
            test_groups: &self.test_groups,
        }
    }
}
