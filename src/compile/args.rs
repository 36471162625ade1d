//! Argument compilation: hash substitution, layering, overrides and the
//! e2enode `--node-args=` post-pass.

use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Replaced by the job-name hash in every argument entry.
pub const JOB_NAME_HASH_PLACEHOLDER: &str = "${job_name_hash}";

const JOB_NAME_HASH_LEN: usize = 10;

const NODE_ARGS_FLAG: &str = "--node-args=";

/// First 10 hex characters of SHA-1(job name).
pub fn job_name_hash(job: &str) -> String {
    let mut hex = hex::encode(Sha1::digest(job.as_bytes()));
    hex.truncate(JOB_NAME_HASH_LEN);
    hex
}

pub fn substitute_hash(hash: &str, args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| arg.replace(JOB_NAME_HASH_PLACEHOLDER, hash))
        .collect()
}

/// Name of an argument entry: the text before the first `=`, or the whole
/// entry when it has none.
pub fn arg_name(entry: &str) -> &str {
    entry.split_once('=').map_or(entry, |(name, _)| name)
}

/// Ordered argument list for one job's container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    entries: Vec<String>,
}

impl ArgList {
    #[cfg(test)]
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Base layer: every layer hash-substituted, concatenated in order.
    pub fn from_layers<'a>(hash: &str, layers: impl IntoIterator<Item = &'a [String]>) -> Self {
        let mut list = Self::default();
        for layer in layers {
            list.push_layer(hash, layer);
        }
        list
    }

    /// Append one axis layer, hash-substituted.
    pub fn push_layer(&mut self, hash: &str, layer: &[String]) {
        self.entries.extend(substitute_hash(hash, layer));
    }

    /// Apply per-job overrides, last writer wins per argument name.
    ///
    /// Matches are looked up in the list as it was before any override was
    /// applied: for each override the first such entry named like it (trimmed
    /// entry equals the name, or starts with `name=`) is removed if still
    /// present, then the override is appended. Entries nobody overrides keep
    /// their relative order; overrides land at the tail in override order.
    pub fn apply_overrides(&mut self, overrides: &[String]) {
        let before = self.entries.clone();

        let mut by_name: BTreeMap<&str, &str> = BTreeMap::new();
        for entry in &before {
            by_name.entry(arg_name(entry.trim())).or_insert(entry.as_str());
        }

        for over in overrides {
            let matched = by_name
                .get(arg_name(over))
                .copied()
                .filter(|m| !m.is_empty());
            if let Some(matched) = matched {
                if let Some(pos) = self.entries.iter().position(|e| e == matched) {
                    self.entries.remove(pos);
                }
            }
            self.entries.push(over.clone());
        }
    }

    /// Pull every `--node-args=` entry out, in encounter order, and append a
    /// single `--node-args=` entry holding their space-joined values.
    pub fn coalesce_node_args(&mut self) {
        let mut values = Vec::new();
        self.entries.retain(|entry| match entry.strip_prefix(NODE_ARGS_FLAG) {
            Some(value) => {
                values.push(value.to_string());
                false
            }
            None => true,
        });

        if !values.is_empty() {
            let joined = values.join(" ");
            self.entries
                .push(format!("{NODE_ARGS_FLAG}{}", joined.trim_end()));
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}
