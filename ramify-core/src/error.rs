//! Error types for the Ramify core library.
//!
//! Defines the error enum exposed by the public API, the stable
//! machine-readable codes used by logging surfaces, and a convenient result
//! alias.

use thiserror::Error;

/// Error type produced when validating inputs or driving a clustering run.
///
/// All input validation happens before any observable mutation: a run that
/// fails with one of these variants leaves no partial tree behind.
///
/// Negative branch lengths are deliberately *not* an error. They are an
/// expected consequence of non-ultrametric linkages (Single, Complete) and
/// are reported at debug level, never clamped.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterError {
    /// A matrix row's width did not match the number of rows.
    #[error("matrix row {row} has {len} columns but {size} rows were supplied")]
    NonSquareMatrix {
        /// Index of the offending row.
        row: usize,
        /// Width of the offending row.
        len: usize,
        /// Number of rows in the matrix.
        size: usize,
    },
    /// The label array length did not match the matrix dimension.
    #[error("{labels} labels were supplied for a {size}x{size} matrix")]
    LabelCountMismatch {
        /// Number of labels supplied by the caller.
        labels: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// A matrix entry was negative, NaN, or infinite.
    #[error("distance at ({row}, {col}) is {value}, expected non-negative finite")]
    InvalidDistance {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The rejected value.
        value: f64,
    },
    /// The requested linkage name is not one of Average, Complete, Single.
    #[error("unknown linkage `{name}`; expected Average, Complete, or Single")]
    UnknownLinkage {
        /// Name supplied by the caller.
        name: String,
    },
    /// The distance matrix contained no rows.
    #[error("cannot cluster an empty distance matrix")]
    EmptyMatrix,
    /// A merge step was requested but fewer than two clusters remain active.
    #[error("no mergeable pair remains ({active} active cluster(s))")]
    ExhaustedClusters {
        /// Number of clusters still active.
        active: usize,
    },
    /// A label occurs more than once, so it cannot be mapped back to a
    /// unique matrix index.
    #[error("label `{label}` is not unique in the original label array")]
    AmbiguousLabel {
        /// The duplicated label.
        label: String,
    },
    /// A requested label does not occur in the original label array.
    #[error("label `{label}` does not occur in the original label array")]
    UnknownLabel {
        /// The missing label.
        label: String,
    },
    /// The caller's cancellation check asked the run loop to stop.
    #[error("clustering cancelled after {completed} merge(s)")]
    Cancelled {
        /// Merges completed before cancellation.
        completed: usize,
    },
}

impl ClusterError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ClusterErrorCode {
        match self {
            Self::NonSquareMatrix { .. } => ClusterErrorCode::NonSquareMatrix,
            Self::LabelCountMismatch { .. } => ClusterErrorCode::LabelCountMismatch,
            Self::InvalidDistance { .. } => ClusterErrorCode::InvalidDistance,
            Self::UnknownLinkage { .. } => ClusterErrorCode::UnknownLinkage,
            Self::EmptyMatrix => ClusterErrorCode::EmptyMatrix,
            Self::ExhaustedClusters { .. } => ClusterErrorCode::ExhaustedClusters,
            Self::AmbiguousLabel { .. } => ClusterErrorCode::AmbiguousLabel,
            Self::UnknownLabel { .. } => ClusterErrorCode::UnknownLabel,
            Self::Cancelled { .. } => ClusterErrorCode::Cancelled,
        }
    }
}

/// Machine-readable error codes for [`ClusterError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClusterErrorCode {
    /// A matrix row's width did not match the number of rows.
    NonSquareMatrix,
    /// The label array length did not match the matrix dimension.
    LabelCountMismatch,
    /// A matrix entry was negative, NaN, or infinite.
    InvalidDistance,
    /// The requested linkage name is unknown.
    UnknownLinkage,
    /// The distance matrix contained no rows.
    EmptyMatrix,
    /// Fewer than two clusters remain active.
    ExhaustedClusters,
    /// A label occurs more than once in the original label array.
    AmbiguousLabel,
    /// A requested label is absent from the original label array.
    UnknownLabel,
    /// The run loop was cancelled by the caller.
    Cancelled,
}

impl ClusterErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonSquareMatrix => "NON_SQUARE_MATRIX",
            Self::LabelCountMismatch => "LABEL_COUNT_MISMATCH",
            Self::InvalidDistance => "INVALID_DISTANCE",
            Self::UnknownLinkage => "UNKNOWN_LINKAGE",
            Self::EmptyMatrix => "EMPTY_MATRIX",
            Self::ExhaustedClusters => "EXHAUSTED_CLUSTERS",
            Self::AmbiguousLabel => "AMBIGUOUS_LABEL",
            Self::UnknownLabel => "UNKNOWN_LABEL",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl core::fmt::Display for ClusterErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_identifiers() {
        let err = ClusterError::UnknownLinkage {
            name: "Ward".to_owned(),
        };
        assert_eq!(err.code(), ClusterErrorCode::UnknownLinkage);
        assert_eq!(err.code().as_str(), "UNKNOWN_LINKAGE");
        assert_eq!(err.code().to_string(), "UNKNOWN_LINKAGE");
    }

    #[test]
    fn display_carries_context() {
        let err = ClusterError::NonSquareMatrix {
            row: 2,
            len: 3,
            size: 4,
        };
        assert_eq!(
            err.to_string(),
            "matrix row 2 has 3 columns but 4 rows were supplied"
        );
    }
}
