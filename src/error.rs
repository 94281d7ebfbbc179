//! Error types shared across the crate.
//!
//! Library code returns [`TalenError`]; the binary wraps it in `anyhow` for
//! reporting. Configuration problems are collected as [`ConfigError`] values so
//! a caller can either reject the run or log each one and carry on.
use std::path::PathBuf;

use thiserror::Error;

/// A single problem found while validating a [`crate::TalenConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_spacer ({min}) is greater than max_spacer ({max})")]
    InvertedSpacer { min: usize, max: usize },
    #[error("array_min ({min}) is greater than array_max ({max})")]
    InvertedArray { min: usize, max: usize },
    #[error("{name} must be a positive integer")]
    NotPositive { name: &'static str },
    #[error("no upstream bases given")]
    NoUpstreamBases,
    #[error("upstream base {0:?} is not one of A, C, G, T")]
    UnknownBase(String),
    #[error("{name} exceeds {max}")]
    TooLarge { name: &'static str, max: usize },
}

/// Every failure the library can surface.
#[derive(Debug, Error)]
pub enum TalenError {
    /// The sequence could not be loaded: missing, unreadable, empty or malformed.
    #[error("input error for {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// The configuration was rejected before enumeration started.
    #[error("invalid configuration: {}", join_problems(.0))]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("candidate table error: {0}")]
    Table(#[from] csv::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

fn join_problems(problems: &[ConfigError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TalenError {
    pub(crate) fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TalenError::Input { path: path.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, TalenError>;
