/// Error types for the wireframe pipeline
use thiserror::Error;

/// Errors raised while loading or assembling wireframe geometry.
///
/// Degenerate geometry (empty scenes, zero extents) is not an error and is
/// reported through `tracing` instead.
#[derive(Debug, Error)]
pub enum WireError {
    /// A vertex or face record could not be parsed.
    #[error("malformed input on line {line}: {message}")]
    MalformedLine {
        /// 1-based line number in the source text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A face loop has fewer than three vertex indices.
    #[error("face {face} has {len} vertex indices, at least 3 are required")]
    FaceTooSmall {
        /// Position of the face in the input list.
        face: usize,
        /// Number of indices the face carried.
        len: usize,
    },

    /// An edge or face references a vertex that does not exist.
    #[error("vertex index {index} is out of range for {len} points")]
    IndexOutOfRange {
        /// The offending index (0-based).
        index: usize,
        /// Number of points available.
        len: usize,
    },

    /// An explicit edge connects a vertex to itself.
    #[error("edge ({index}, {index}) is a self loop")]
    SelfLoop {
        /// The repeated vertex index.
        index: usize,
    },

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a mesh file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// Create a `MalformedLine` error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias for `Result<T, WireError>`.
pub type WireResult<T> = Result<T, WireError>;
