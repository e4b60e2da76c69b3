//! Common error types used throughout renderforge.
//!
//! Every failure of the job compiler is non-recoverable at the compiler layer:
//! compilation halts, no tasks are authored, and the error travels back to the
//! submission boundary. [`Error::kind`] gives that boundary a stable name to
//! report next to the human-readable message.

/// Common error type for renderforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The job asks for a render format this job type cannot produce.
    #[error("This job type only renders images, and not \"{0}\"")]
    UnsupportedFormat(String),

    /// The job has no render output path template to resolve.
    #[error("no render_output_path setting!")]
    UnresolvedRenderOutputPath,

    /// The frame selection could not be parsed.
    #[error("Invalid frame expression {expr:?}: {reason}")]
    InvalidFrameExpression {
        /// The expression as submitted.
        expr: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The chunk size is not a positive number.
    #[error("Invalid chunk size {0}: must be at least 1")]
    InvalidChunkSize(i64),

    /// Job settings failed the schema check at the submission boundary.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl Error {
    /// Create a new InvalidFrameExpression error.
    pub fn invalid_frames<E: Into<String>, R: Into<String>>(expr: E, reason: R) -> Self {
        Self::InvalidFrameExpression {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    /// Create a new InvalidSettings error.
    pub fn invalid_settings<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSettings(msg.into())
    }

    /// Stable, snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::UnresolvedRenderOutputPath => "unresolved_render_output_path",
            Self::InvalidFrameExpression { .. } => "invalid_frame_expression",
            Self::InvalidChunkSize(_) => "invalid_chunk_size",
            Self::InvalidSettings(_) => "invalid_settings",
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
