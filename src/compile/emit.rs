//! Job emission: assemble the Periodic (and, for e2e jobs, the TestGroup).

use crate::compile::dashboard::DashboardAssignment;
use crate::compile::resolve::{ResolvedAxes, VersionAxis};
use crate::config::{ComputeResources, JobSpec, Resources};
use crate::error::{CompileError, CompileResult};
use crate::output::{
    ColumnHeader, Container, DecorationConfig, Periodic, PodSpec, Schedule, TestGroup,
};
use std::collections::BTreeMap;

pub const DEFAULT_IMAGE: &str =
    "gcr.io/k8s-staging-test-infra/kubekins-e2e:v20231206-f7b83ffbe6-master";
pub const DEFAULT_SCENARIO: &str = "kubernetes_e2e";
pub const GCS_LOG_PREFIX: &str = "kubernetes-jenkins/logs/";

const RUNNER: &str = "runner.sh";
const DEFAULT_CPU: &str = "1000m";
const DEFAULT_MEMORY: &str = "3Gi";
const NODE_ROOT_ARG: &str = "--root=/go/src";
const COLUMN_HEADERS: [&str; 4] = ["node_os_image", "master_os_image", "Commit", "infra-commit"];

/// Per-job inputs already computed by the earlier pipeline stages.
pub struct EmitInput<'a> {
    pub name: &'a str,
    pub job: &'a JobSpec,
    pub axes: &'a ResolvedAxes,
    pub timeout: String,
    pub dashboards: &'a DashboardAssignment,
    pub args: Vec<String>,
}

pub fn default_resources() -> Resources {
    Resources {
        requests: ComputeResources::new(DEFAULT_CPU, DEFAULT_MEMORY),
        limits: ComputeResources::new(DEFAULT_CPU, DEFAULT_MEMORY),
    }
}

/// Interval wins when both are set; empty strings count as unset.
pub fn schedule(name: &str, job: &JobSpec) -> CompileResult<Schedule> {
    let set = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());

    if let Some(interval) = set(&job.interval) {
        Ok(Schedule::Interval(interval))
    } else if let Some(cron) = set(&job.cron) {
        Ok(Schedule::Cron(cron))
    } else {
        Err(CompileError::MissingSchedule {
            job: name.to_string(),
        })
    }
}

pub fn emit_periodic(input: EmitInput<'_>) -> CompileResult<Periodic> {
    let EmitInput {
        name,
        job,
        axes,
        timeout,
        dashboards,
        args,
    } = input;

    let suite = &axes.test_suite.value;

    let cluster = if !suite.cluster.is_empty() {
        suite.cluster.clone()
    } else {
        job.cluster.clone()
    };

    let resources = if suite.resources.is_present() {
        suite.resources.clone()
    } else if job.resources.is_present() {
        job.resources.clone()
    } else {
        default_resources()
    };

    let mut image = DEFAULT_IMAGE.to_string();
    let mut container_args = Vec::new();
    if let VersionAxis::Node(version) = &axes.version {
        container_args.extend(version.value.args.iter().cloned());
        container_args.push(NODE_ROOT_ARG.to_string());
        if !version.value.prow_image.is_empty() {
            image = version.value.prow_image.clone();
        }
    }
    container_args.extend(args);

    let scenario = if job.scenario.is_empty() {
        DEFAULT_SCENARIO
    } else {
        job.scenario.as_str()
    };

    let labels = BTreeMap::from([
        ("preset-k8s-ssh".to_string(), "true".to_string()),
        ("preset-service-account".to_string(), "true".to_string()),
    ]);

    Ok(Periodic {
        name: name.to_string(),
        tags: vec!["generated".to_string()],
        schedule: schedule(name, job)?,
        cluster,
        labels,
        decorate: true,
        decoration_config: DecorationConfig { timeout },
        annotations: dashboards.annotations(),
        spec: PodSpec {
            containers: vec![Container {
                image,
                command: vec![
                    RUNNER.to_string(),
                    format!("/workspace/scenarios/{scenario}.py"),
                ],
                args: container_args,
                resources,
            }],
        },
    })
}

pub fn emit_test_group(name: &str) -> TestGroup {
    TestGroup {
        name: name.to_string(),
        gcs_prefix: format!("{GCS_LOG_PREFIX}{name}"),
        column_header: COLUMN_HEADERS
            .iter()
            .map(|h| ColumnHeader {
                configuration_value: h.to_string(),
            })
            .collect(),
    }
}
