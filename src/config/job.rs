use crate::config::Resources;
use serde::Deserialize;

/// One entry of the `jobs` map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Scenario script name under `/workspace/scenarios/`. Empty means the
    /// default `kubernetes_e2e` scenario.
    #[serde(default)]
    pub scenario: String,

    #[serde(default)]
    pub interval: Option<String>,

    #[serde(default)]
    pub cron: Option<String>,

    /// Not consumed by any stage.
    #[serde(default)]
    #[allow(dead_code)]
    pub sig_owners: Vec<String>,

    #[serde(default)]
    pub release_blocking: bool,

    #[serde(default)]
    pub release_informing: bool,

    #[serde(default)]
    pub cluster: String,

    #[serde(default)]
    pub testgrid_num_failures_to_alert: i64,

    /// Per-job overrides applied on top of the axis layers.
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub resources: Resources,
}
