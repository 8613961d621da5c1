use std::path::PathBuf;
use thiserror::Error;

/// Failures around the durable history table.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Stored history that cannot be parsed is never guessed at or
    /// partially dropped; the run aborts before any write.
    #[error("corrupt history in {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("cannot read history {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write history {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A mount path could not be statted for a new sample.
#[derive(Debug, Error)]
#[error("cannot stat {}: {source}", path.display())]
pub struct CollectError {
    pub path: PathBuf,
    #[source]
    pub source: nix::Error,
}

/// Fatal pipeline failures, mapped to distinct exit codes so cron and
/// monitoring can tell them apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Collect(_) => 1,
            AppError::History(HistoryError::Corrupt { .. } | HistoryError::Read { .. }) => 2,
            AppError::History(HistoryError::Write { .. }) => 3,
        }
    }
}
