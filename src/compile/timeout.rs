use crate::error::{CompileError, CompileResult};
use regex::Regex;
use std::sync::LazyLock;

/// Decoration timeout kept when the test suite sets no `--timeout=`.
pub const DEFAULT_TIMEOUT: &str = "180m";

/// Added on top of the test's own timeout so the pod outlives the test.
pub const TIMEOUT_BUFFER_MINUTES: i64 = 20;

const TIMEOUT_FLAG: &str = "--timeout=";

// Amount followed by a single unit character; the unit is assumed to be `m`.
static TIMEOUT_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--timeout=(?P<amount>.*).$").expect("timeout regex is valid")
});

/// Derive the decoration timeout from the test suite's raw argument layer.
pub fn derive_timeout(job: &str, suite_args: &[String]) -> CompileResult<String> {
    let Some(arg) = suite_args.iter().find(|a| a.starts_with(TIMEOUT_FLAG)) else {
        return Ok(DEFAULT_TIMEOUT.to_string());
    };

    let amount = TIMEOUT_ARG_RE
        .captures(arg)
        .and_then(|caps| caps.name("amount"))
        .map_or("", |m| m.as_str());

    // Any integer is accepted, signed included; only non-numeric text fails.
    let minutes: i64 = amount
        .parse()
        .map_err(|source| CompileError::MalformedTimeout {
            job: job.to_string(),
            arg: arg.clone(),
            source,
        })?;

    Ok(format!("{}m", minutes.saturating_add(TIMEOUT_BUFFER_MINUTES)))
}
