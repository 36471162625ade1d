//! Job name parsing.
//!
//! Job names are hyphen-delimited; the third token selects the kind and the
//! remaining tokens are positional axis keys:
//!
//! ci-kubernetes-e2e-gce-cos-ver1.29-default
//!   => kind e2e, cloud provider "gce", image "cos", version "1.29", suite "default"
//!
//! ci-kubernetes-e2enode-cos-ver1.29-serial
//!   => kind e2enode, image "cos", version "1.29", suite "serial"

use crate::compile::JobKind;
use crate::error::{CompileError, CompileResult};

/// Number of characters (not bytes) in front of the version inside the
/// version token (`ver1.29` => `1.29`).
const VERSION_PREFIX_LEN: usize = 3;

/// Index of the kind token.
const KIND_INDEX: usize = 2;

/// Positional fields extracted from a job name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub kind: JobKind,
    /// Present for e2e jobs only.
    pub cloud_provider: Option<String>,
    pub image: String,
    /// Version key with its prefix stripped.
    pub k8s_version: String,
    pub test_suite: String,
    /// Every token after the kind token, verbatim.
    pub axis_tokens: Vec<String>,
    /// The version token as written in the name, prefix included.
    pub version_token: String,
}

impl ParsedName {
    /// Hyphen-joined axis tokens, used as the dashboard tab name.
    pub fn tab_name(&self) -> String {
        self.axis_tokens.join("-")
    }
}

pub fn parse_job_name(job: &str) -> CompileResult<ParsedName> {
    let fields: Vec<&str> = job.split('-').collect();
    if fields.len() <= KIND_INDEX {
        return Err(CompileError::TooFewFields {
            job: job.to_string(),
            found: fields.len(),
        });
    }

    let kind = JobKind::from_token(fields[KIND_INDEX]).ok_or_else(|| {
        CompileError::UnknownJobKind {
            job: job.to_string(),
            kind: fields[KIND_INDEX].to_string(),
        }
    })?;

    let expected = kind.field_count();
    if fields.len() != expected {
        return Err(CompileError::FieldCount {
            job: job.to_string(),
            kind,
            expected,
            found: fields.len(),
        });
    }

    let axis_tokens: Vec<String> = fields[KIND_INDEX + 1..]
        .iter()
        .map(|t| t.to_string())
        .collect();

    // e2e carries a leading cloud-provider token; both kinds then share the
    // image / version / suite tail.
    let (cloud_provider, tail) = match kind {
        JobKind::E2e => (Some(axis_tokens[0].clone()), &axis_tokens[1..]),
        JobKind::E2eNode => (None, &axis_tokens[..]),
    };
    let [image, version_token, test_suite] = tail else {
        unreachable!("field count checked above");
    };

    // The prefix is counted in characters, not bytes.
    let k8s_version = version_token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(version_token.len()))
        .nth(VERSION_PREFIX_LEN)
        .map(|start| version_token[start..].to_string())
        .ok_or_else(|| CompileError::ShortVersionToken {
            job: job.to_string(),
            token: version_token.clone(),
        })?;

    Ok(ParsedName {
        kind,
        cloud_provider,
        image: image.clone(),
        k8s_version,
        test_suite: test_suite.clone(),
        version_token: version_token.clone(),
        axis_tokens,
    })
}
