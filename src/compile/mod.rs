//! Compilation pipeline: one job name in, one Periodic (plus an optional
//! TestGroup) out.
//!
//! Stages, in order:
//! - name: split the job name into kind + axis keys
//! - resolve: look the keys up in the config document
//! - args: layer, override and post-process the argument list
//! - timeout: derive the decoration timeout from the test suite
//! - dashboard: tab name and dashboard annotations
//! - emit: assemble the output records

pub mod args;
pub mod dashboard;
pub mod emit;
pub mod name;
pub mod resolve;
pub mod timeout;

use crate::config::{ConfigDocument, JobSpec};
use crate::error::CompileResult;
use crate::output::{Batch, Periodic, TestGroup};
use args::ArgList;
use emit::EmitInput;
use std::fmt;

/// Job kind, selected by the third token of the job name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Cluster e2e: `<a>-<b>-e2e-<provider>-<image>-<version>-<suite>`.
    E2e,
    /// Node e2e: `<a>-<b>-e2enode-<image>-<version>-<suite>`.
    E2eNode,
}

impl JobKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "e2e" => Some(Self::E2e),
            "e2enode" => Some(Self::E2eNode),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::E2e => "e2e",
            Self::E2eNode => "e2enode",
        }
    }

    /// Hyphen-separated fields a job name of this kind must have.
    pub fn field_count(self) -> usize {
        match self {
            Self::E2e => 7,
            Self::E2eNode => 6,
        }
    }

    pub fn emits_test_group(self) -> bool {
        matches!(self, Self::E2e)
    }

    pub fn coalesces_node_args(self) -> bool {
        matches!(self, Self::E2eNode)
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Treat an axis key missing from its map as an error.
    pub strict_axes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledJob {
    pub periodic: Periodic,
    pub test_group: Option<TestGroup>,
    /// `axis=key` pairs that resolved to empty defaults.
    pub unresolved_axes: Vec<String>,
}

/// Compile one job. Pure: reads `doc` and `job`, shares nothing with other
/// jobs.
pub fn compile_job(
    name: &str,
    job: &JobSpec,
    doc: &ConfigDocument,
    opts: CompileOptions,
) -> CompileResult<CompiledJob> {
    let parsed = name::parse_job_name(name)?;
    let axes = resolve::resolve_axes(name, &parsed, doc, opts.strict_axes)?;

    let hash = args::job_name_hash(name);
    let mut arg_list = ArgList::from_layers(&hash, axes.layers());
    tracing::debug!(job = name, base = ?arg_list.as_slice(), "base argument layers");

    arg_list.apply_overrides(&args::substitute_hash(&hash, &job.args));
    if parsed.kind.coalesces_node_args() {
        arg_list.coalesce_node_args();
    }

    let timeout = timeout::derive_timeout(name, &axes.test_suite.value.args)?;
    let dashboards = dashboard::assign_dashboards(
        &parsed,
        job,
        &axes.image.value,
        axes.version.release_version(),
    );

    let periodic = emit::emit_periodic(EmitInput {
        name,
        job,
        axes: &axes,
        timeout,
        dashboards: &dashboards,
        args: arg_list.into_vec(),
    })?;
    let test_group = parsed
        .kind
        .emits_test_group()
        .then(|| emit::emit_test_group(name));

    tracing::info!(job = name, kind = %parsed.kind, "generated job");

    Ok(CompiledJob {
        periodic,
        test_group,
        unresolved_axes: axes.unresolved(),
    })
}

/// Compile every job in the document, in sorted name order. The first error
/// aborts the batch.
pub fn compile_all(doc: &ConfigDocument, opts: CompileOptions) -> CompileResult<Batch> {
    let mut batch = Batch::default();

    for name in doc.sorted_job_names() {
        let job = &doc.jobs[name];
        let compiled = compile_job(name, job, doc, opts)?;

        batch.periodics.push(compiled.periodic);
        batch.test_groups.extend(compiled.test_group);
        batch.unresolved_axes.extend(
            compiled
                .unresolved_axes
                .into_iter()
                .map(|axis| format!("{name}: {axis}")),
        );
    }

    Ok(batch)
}
