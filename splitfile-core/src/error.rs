use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds surfaced by the planner, the splitters and the merge engine.
///
/// Nothing is retried internally and no partially written files are cleaned
/// up; callers that want atomicity must arrange it themselves.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("part count must be at least 1 (got {0})")]
    InvalidPartCount(u32),

    #[error("max part size must be at least 1 byte (got {0})")]
    InvalidMaxSize(u64),

    #[error("source file is empty")]
    EmptySource,

    #[error("too many parts: {parts} parts for {total} byte(s)")]
    OverPartitioned { parts: u32, total: u64 },

    #[error("merge needs at least one input file")]
    EmptyMergeList,

    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        SplitError::Io { op, path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
