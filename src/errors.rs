use std::path::PathBuf;

use crate::types::ExitOutcome;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Iteration count must be at least 1 (got {runs})")]
    InvalidRunCount { runs: usize },

    #[error("Subject binary path is empty")]
    EmptyBinaryPath,

    #[error("Build command is empty")]
    EmptyBuildCommand,

    #[error("Subject file {path} does not exist")]
    SubjectFileNotFound { path: PathBuf },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Build failed: could not launch '{program}': {source}")]
    BuildLaunch {
        program: String,
        source: std::io::Error,
    },

    #[error("Build failed with {status}")]
    BuildFailed { status: ExitOutcome },

    #[error("Run {iteration}/{runs} failed: could not launch subject binary: {source}")]
    RunLaunch {
        iteration: usize,
        runs: usize,
        source: std::io::Error,
    },

    #[error("Run {iteration}/{runs} failed with {status}")]
    RunFailed {
        iteration: usize,
        runs: usize,
        status: ExitOutcome,
    },

    #[error("'{path}' is not a directory.")]
    NotADirectory { path: PathBuf },
}
