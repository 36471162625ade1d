//! Axis resolution: parsed name fields => axis records from the document.
//!
//! A key missing from its map resolves to the axis' zero value. The miss is
//! recorded on the result (`defaulted`) and logged; with `strict` it becomes
//! an `UnknownAxisKey` error instead.

use crate::compile::JobKind;
use crate::compile::name::ParsedName;
use crate::config::{
    CloudProvider, Common, ConfigDocument, Image, K8sVersion, NodeK8sVersion, TestSuite,
};
use crate::error::{CompileError, CompileResult};
use std::collections::BTreeMap;

/// One axis record plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub axis: &'static str,
    pub key: String,
    pub value: T,
    /// True when `key` was absent and `value` is the zero value.
    pub defaulted: bool,
}

/// The version axis differs in shape between job kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionAxis {
    Release(Resolved<K8sVersion>),
    Node(Resolved<NodeK8sVersion>),
}

impl VersionAxis {
    /// Release version used for `sig-release-*` dashboards; node versions
    /// carry none.
    pub fn release_version(&self) -> &str {
        match self {
            VersionAxis::Release(v) => &v.value.version,
            VersionAxis::Node(_) => "",
        }
    }

    fn defaulted(&self) -> Option<(&'static str, &str)> {
        match self {
            VersionAxis::Release(v) => v.defaulted.then_some((v.axis, v.key.as_str())),
            VersionAxis::Node(v) => v.defaulted.then_some((v.axis, v.key.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAxes {
    pub common: Common,
    /// e2e jobs only.
    pub cloud_provider: Option<Resolved<CloudProvider>>,
    pub image: Resolved<Image>,
    pub version: VersionAxis,
    pub test_suite: Resolved<TestSuite>,
}

impl ResolvedAxes {
    /// Argument layers in base-layer order: common, cloud provider, image,
    /// release version, test suite. Node versions contribute no layer here.
    pub fn layers(&self) -> Vec<&[String]> {
        let mut layers: Vec<&[String]> = vec![self.common.args.as_slice()];
        if let Some(cp) = &self.cloud_provider {
            layers.push(&cp.value.args);
        }
        layers.push(&self.image.value.args);
        if let VersionAxis::Release(v) = &self.version {
            layers.push(&v.value.args);
        }
        layers.push(&self.test_suite.value.args);
        layers
    }

    /// `axis=key` for every key that fell back to a zero value.
    pub fn unresolved(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut note = |axis: &str, key: &str| out.push(format!("{axis}={key}"));

        if let Some(cp) = self.cloud_provider.as_ref().filter(|cp| cp.defaulted) {
            note(cp.axis, &cp.key);
        }
        if self.image.defaulted {
            note(self.image.axis, &self.image.key);
        }
        if let Some((axis, key)) = self.version.defaulted() {
            note(axis, key);
        }
        if self.test_suite.defaulted {
            note(self.test_suite.axis, &self.test_suite.key);
        }
        out
    }
}

pub fn resolve_axes(
    job: &str,
    name: &ParsedName,
    doc: &ConfigDocument,
    strict: bool,
) -> CompileResult<ResolvedAxes> {
    let cloud_provider = match &name.cloud_provider {
        Some(key) => Some(lookup(job, "cloudProviders", &doc.cloud_providers, key, strict)?),
        None => None,
    };

    let image = lookup(job, "images", &doc.images, &name.image, strict)?;

    let version = match name.kind {
        JobKind::E2e => VersionAxis::Release(lookup(
            job,
            "k8sVersions",
            &doc.k8s_versions,
            &name.k8s_version,
            strict,
        )?),
        JobKind::E2eNode => VersionAxis::Node(lookup(
            job,
            "nodeK8sVersions",
            &doc.node_k8s_versions,
            &name.k8s_version,
            strict,
        )?),
    };

    let test_suite = lookup(job, "testSuites", &doc.test_suites, &name.test_suite, strict)?;

    Ok(ResolvedAxes {
        common: doc.common.clone(),
        cloud_provider,
        image,
        version,
        test_suite,
    })
}

fn lookup<T: Clone + Default>(
    job: &str,
    axis: &'static str,
    map: &BTreeMap<String, T>,
    key: &str,
    strict: bool,
) -> CompileResult<Resolved<T>> {
    if let Some(value) = map.get(key) {
        return Ok(Resolved {
            axis,
            key: key.to_string(),
            value: value.clone(),
            defaulted: false,
        });
    }

    if strict {
        return Err(CompileError::UnknownAxisKey {
            job: job.to_string(),
            axis,
            key: key.to_string(),
        });
    }

    tracing::warn!(job, axis, key, "axis key not defined, using empty defaults");
    Ok(Resolved {
        axis,
        key: key.to_string(),
        value: T::default(),
        defaulted: true,
    })
}
