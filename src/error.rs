//! Error types.
//!
//! The per-frame tracker itself never fails; errors only come from loading
//! configuration, from malformed frames and from the marker detector.

use std::path::PathBuf;

use thiserror::Error;

/// Error produced while loading or validating a [`TrackerConfig`](crate::TrackerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Error for frames that cannot be steered on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame has a zero dimension ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
}

/// Error returned by [`SteeringPipeline`](crate::SteeringPipeline).
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("marker detection failed")]
    Detection(#[source] E),
    #[error(transparent)]
    Frame(#[from] FrameError),
}
