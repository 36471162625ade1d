//! Dashboard and tab assignment.
//!
//! e2e jobs always get a tab name and a dashboard list (release dashboard,
//! plus the image's prefixed dashboard when it has a prefix). e2enode jobs
//! only get dashboard annotations through the image prefix, which replaces
//! the release dashboard outright.

use crate::compile::JobKind;
use crate::compile::name::ParsedName;
use crate::config::{Image, JobSpec};
use crate::output::{ANNOTATION_DASHBOARDS, ANNOTATION_NUM_FAILURES_TO_ALERT, ANNOTATION_TAB_NAME};
use std::collections::BTreeMap;

pub const GENERATED_DASHBOARD: &str = "sig-release-generated";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardAssignment {
    pub tab_name: Option<String>,
    pub dashboards: Vec<String>,
    pub num_failures_to_alert: Option<i64>,
}

impl DashboardAssignment {
    pub fn annotations(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let Some(tab) = &self.tab_name {
            out.insert(ANNOTATION_TAB_NAME.to_string(), tab.clone());
        }
        if !self.dashboards.is_empty() {
            out.insert(ANNOTATION_DASHBOARDS.to_string(), self.dashboards.join(", "));
        }
        if let Some(n) = self.num_failures_to_alert {
            out.insert(ANNOTATION_NUM_FAILURES_TO_ALERT.to_string(), n.to_string());
        }
        out
    }
}

/// `sig-release-<version>-blocking`, `-informing`, or the generated fallback.
pub fn release_dashboard(job: &JobSpec, version: &str) -> String {
    if job.release_blocking {
        format!("sig-release-{version}-blocking")
    } else if job.release_informing {
        format!("sig-release-{version}-informing")
    } else {
        GENERATED_DASHBOARD.to_string()
    }
}

pub fn assign_dashboards(
    name: &ParsedName,
    job: &JobSpec,
    image: &Image,
    version: &str,
) -> DashboardAssignment {
    let prefixed = (!image.testgrid_prefix.is_empty()).then(|| {
        format!(
            "{}-{}-{}",
            image.testgrid_prefix, name.image, name.version_token
        )
    });

    match name.kind {
        JobKind::E2e => {
            let mut dashboards = vec![release_dashboard(job, version)];
            dashboards.extend(prefixed);
            DashboardAssignment {
                tab_name: Some(name.tab_name()),
                dashboards,
                num_failures_to_alert: Some(job.testgrid_num_failures_to_alert),
            }
        }
        JobKind::E2eNode => match prefixed {
            Some(dashboard) => DashboardAssignment {
                tab_name: Some(name.tab_name()),
                dashboards: vec![dashboard],
                num_failures_to_alert: None,
            },
            None => DashboardAssignment::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::name::parse_job_name;
    use pretty_assertions::assert_eq;

    fn image(prefix: &str) -> Image {
        Image {
            args: vec![],
            testgrid_prefix: prefix.to_string(),
        }
    }

    #[test]
    fn release_dashboard_precedence() {
        let mut job = JobSpec {
            release_blocking: true,
            release_informing: true,
            ..JobSpec::default()
        };
        assert_eq!(release_dashboard(&job, "1.29"), "sig-release-1.29-blocking");

        job.release_blocking = false;
        assert_eq!(release_dashboard(&job, "1.29"), "sig-release-1.29-informing");

        job.release_informing = false;
        assert_eq!(release_dashboard(&job, "1.29"), GENERATED_DASHBOARD);
    }

    #[test]
    fn e2e_appends_prefixed_dashboard() {
        let name = parse_job_name("ci-kubernetes-e2e-gce-cos-ver1.29-default").unwrap();
        let job = JobSpec {
            release_blocking: true,
            testgrid_num_failures_to_alert: 3,
            ..JobSpec::default()
        };

        let assigned = assign_dashboards(&name, &job, &image("google"), "1.29");
        assert_eq!(
            assigned.dashboards,
            vec![
                "sig-release-1.29-blocking".to_string(),
                "google-cos-ver1.29".to_string()
            ]
        );

        let annotations = assigned.annotations();
        assert_eq!(annotations[ANNOTATION_TAB_NAME], "gce-cos-ver1.29-default");
        assert_eq!(
            annotations[ANNOTATION_DASHBOARDS],
            "sig-release-1.29-blocking, google-cos-ver1.29"
        );
        assert_eq!(annotations[ANNOTATION_NUM_FAILURES_TO_ALERT], "3");
    }

    #[test]
    fn e2e_without_prefix_keeps_release_dashboard_only() {
        let name = parse_job_name("ci-kubernetes-e2e-gce-cos-ver1.29-default").unwrap();
        let assigned = assign_dashboards(&name, &JobSpec::default(), &image(""), "1.29");
        assert_eq!(assigned.dashboards, vec![GENERATED_DASHBOARD.to_string()]);
        assert_eq!(assigned.annotations()[ANNOTATION_NUM_FAILURES_TO_ALERT], "0");
    }

    #[test]
    fn negative_alert_threshold_passes_through() {
        let name = parse_job_name("ci-kubernetes-e2e-gce-cos-ver1.29-default").unwrap();
        let job = JobSpec {
            testgrid_num_failures_to_alert: -1,
            ..JobSpec::default()
        };
        let assigned = assign_dashboards(&name, &job, &image(""), "1.29");
        assert_eq!(assigned.annotations()[ANNOTATION_NUM_FAILURES_TO_ALERT], "-1");
    }

    #[test]
    fn e2enode_prefix_replaces_release_dashboard() {
        let name = parse_job_name("ci-kubernetes-e2enode-cos-ver1.29-serial").unwrap();
        let job = JobSpec {
            release_blocking: true,
            ..JobSpec::default()
        };

        let assigned = assign_dashboards(&name, &job, &image("sig-node"), "");
        assert_eq!(assigned.dashboards, vec!["sig-node-cos-ver1.29".to_string()]);
        assert_eq!(assigned.tab_name.as_deref(), Some("cos-ver1.29-serial"));
        assert!(!assigned.annotations().contains_key(ANNOTATION_NUM_FAILURES_TO_ALERT));
    }

    #[test]
    fn e2enode_without_prefix_has_no_annotations() {
        let name = parse_job_name("ci-kubernetes-e2enode-cos-ver1.29-serial").unwrap();
        let assigned = assign_dashboards(&name, &JobSpec::default(), &image(""), "");
        assert!(assigned.annotations().is_empty());
    }
}
