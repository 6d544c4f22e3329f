//! Error types and context management for characterization operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all characterization operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Input grid is empty, malformed, or holds a single phase
    InvalidVolume {
        /// Description of what's wrong with the volume
        reason: String,
    },

    /// Distribution with no usable normalization
    ///
    /// Occurs when:
    /// - No samples carry positive density
    /// - The normalization integral is zero or non-finite
    /// - The standard deviation collapses to zero
    DegenerateDistribution {
        /// Name of the distribution being reduced
        distribution: &'static str,
        /// Description of the degeneracy
        reason: String,
    },

    /// Void phase does not connect the two faces normal to an axis
    NonPercolatingAxis {
        /// Axis index (0, 1 or 2)
        axis: usize,
    },

    /// Iterative transport solve stopped before reaching tolerance
    SolveNonConvergence {
        /// Axis index (0, 1 or 2)
        axis: usize,
        /// Iterations performed
        iterations: usize,
        /// Relative residual when the solver gave up
        relative_residual: f64,
    },

    /// Phase boundary mesh is empty or unusable
    TopologyExtractionFailure {
        /// Description of the failure
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a slice image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Fieldless classification of [`AnalysisError`] used in descriptor records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AnalysisError::InvalidVolume`]
    InvalidVolume,
    /// See [`AnalysisError::DegenerateDistribution`]
    DegenerateDistribution,
    /// See [`AnalysisError::NonPercolatingAxis`]
    NonPercolatingAxis,
    /// See [`AnalysisError::SolveNonConvergence`]
    SolveNonConvergence,
    /// See [`AnalysisError::TopologyExtractionFailure`]
    TopologyExtractionFailure,
    /// See [`AnalysisError::InvalidParameter`]
    InvalidParameter,
    /// See [`AnalysisError::ImageLoad`]
    ImageLoad,
    /// See [`AnalysisError::FileSystem`]
    FileSystem,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidVolume => "invalid volume",
            Self::DegenerateDistribution => "degenerate distribution",
            Self::NonPercolatingAxis => "non-percolating axis",
            Self::SolveNonConvergence => "solve non-convergence",
            Self::TopologyExtractionFailure => "topology extraction failure",
            Self::InvalidParameter => "invalid parameter",
            Self::ImageLoad => "image load",
            Self::FileSystem => "file system",
        };
        f.write_str(name)
    }
}

impl AnalysisError {
    /// Classification of this error without its payload
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidVolume { .. } => ErrorKind::InvalidVolume,
            Self::DegenerateDistribution { .. } => ErrorKind::DegenerateDistribution,
            Self::NonPercolatingAxis { .. } => ErrorKind::NonPercolatingAxis,
            Self::SolveNonConvergence { .. } => ErrorKind::SolveNonConvergence,
            Self::TopologyExtractionFailure { .. } => ErrorKind::TopologyExtractionFailure,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::ImageLoad { .. } => ErrorKind::ImageLoad,
            Self::FileSystem { .. } => ErrorKind::FileSystem,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVolume { reason } => {
                write!(f, "Invalid volume: {reason}")
            }
            Self::DegenerateDistribution {
                distribution,
                reason,
            } => {
                write!(f, "Degenerate {distribution} distribution: {reason}")
            }
            Self::NonPercolatingAxis { axis } => {
                write!(f, "Void phase does not percolate along axis {axis}")
            }
            Self::SolveNonConvergence {
                axis,
                iterations,
                relative_residual,
            } => {
                write!(
                    f,
                    "Transport solve along axis {axis} did not converge after {iterations} iterations (relative residual {relative_residual:.3e})"
                )
            }
            Self::TopologyExtractionFailure { reason } => {
                write!(f, "Topology extraction failed: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for characterization results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Axis being processed
    pub axis: Option<usize>,
    /// Path of the file being processed
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with processing state
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the operation context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the operation context applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AnalysisError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only axis- and path-bearing errors take positional context
            match &mut error {
                AnalysisError::NonPercolatingAxis { axis }
                | AnalysisError::SolveNonConvergence { axis, .. } => {
                    if let Some(context_axis) = context.axis {
                        *axis = context_axis;
                    }
                }
                AnalysisError::ImageLoad { path, .. } | AnalysisError::FileSystem { path, .. } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                }
                _ => {}
            }
            if let (AnalysisError::FileSystem { operation, .. }, Some(context_operation)) =
                (&mut error, context.operation)
            {
                *operation = context_operation;
            }
            error
        })
    }

    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid volume error
pub fn invalid_volume(reason: &impl ToString) -> AnalysisError {
    AnalysisError::InvalidVolume {
        reason: reason.to_string(),
    }
}

/// Create a degenerate distribution error
pub fn degenerate(distribution: &'static str, reason: &impl ToString) -> AnalysisError {
    AnalysisError::DegenerateDistribution {
        distribution,
        reason: reason.to_string(),
    }
}
