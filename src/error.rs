use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Why a training batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFault {
    /// The batch holds no points.
    Empty,
    /// `points` and `labels` are not index aligned.
    LengthMismatch { points: usize, labels: usize },
    /// A label falls outside `[0, num_classes)`.
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_classes: usize,
    },
}

/// Caller contract violations. None of them are transient, so nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A network, dataset or run was configured with unusable values.
    InvalidConfiguration(String),
    /// A point's dimensionality disagrees with the configured input dimension.
    DimensionMismatch { expected: usize, got: usize },
    /// A training batch failed validation; parameters were left untouched.
    InvalidBatch(BatchFault),
}

impl NetworkError {
    pub(crate) fn config(msg: impl Into<String>) -> NetworkError {
        NetworkError::InvalidConfiguration(msg.into())
    }
}

impl Display for BatchFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchFault::Empty => write!(f, "the batch is empty"),
            BatchFault::LengthMismatch { points, labels } => {
                write!(f, "got {points} points but {labels} labels")
            }
            BatchFault::LabelOutOfRange {
                index,
                label,
                num_classes,
            } => write!(
                f,
                "label {label} at index {index} is outside [0, {num_classes})"
            ),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            NetworkError::DimensionMismatch { expected, got } => write!(
                f,
                "points have dimension {got}, the network expects {expected}"
            ),
            NetworkError::InvalidBatch(fault) => write!(f, "invalid batch: {fault}"),
        }
    }
}

impl Error for NetworkError {}
