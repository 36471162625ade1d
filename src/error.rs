//! Fatal compile errors. Any of these aborts the whole batch.

use crate::compile::JobKind;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("job {job}: expected at least 3 hyphen-separated fields, found {found}")]
    TooFewFields { job: String, found: usize },

    #[error("job {job}: unexpected job type {kind:?}")]
    UnknownJobKind { job: String, kind: String },

    #[error("job {job}: expected {expected} fields for a {kind} job, found {found}")]
    FieldCount {
        job: String,
        kind: JobKind,
        expected: usize,
        found: usize,
    },

    #[error("job {job}: version field {token:?} is shorter than its prefix")]
    ShortVersionToken { job: String, token: String },

    #[error("job {job}: cannot parse timeout from {arg:?}")]
    MalformedTimeout {
        job: String,
        arg: String,
        #[source]
        source: ParseIntError,
    },

    #[error("job {job}: no interval or cron definition found")]
    MissingSchedule { job: String },

    #[error("job {job}: {axis} key {key:?} is not defined")]
    UnknownAxisKey {
        job: String,
        axis: &'static str,
        key: String,
    },
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
