//! Error handling for PatternKit
//!
//! Provides error types for all layers of the engine:
//! - Drafting errors (block selection, geometry construction)
//! - Export errors (DXF/PDF stream construction)
//! - Pipeline errors (recompute session lifecycle)
//!
//! All error types use `thiserror` for ergonomic error handling. None of
//! the fallible paths in the engine panic; every failure surfaces as one
//! of these variants so the live-preview loop can keep the previously
//! displayed document intact.

use thiserror::Error;

/// Drafting error type
///
/// Represents failures while constructing pattern geometry. Garment
/// classification itself never fails (unknown descriptions fall back to
/// the bodice family), so these variants cover structural problems.
#[derive(Error, Debug, Clone)]
pub enum DraftError {
    /// A block library entry produced no control points
    #[error("Block '{block}' contains no control points")]
    EmptyBlock {
        /// Name of the offending block.
        block: String,
    },

    /// A deformation stage changed the point count
    #[error("Deformation changed point count for '{block}': {before} -> {after}")]
    PointCountMismatch {
        /// Name of the block being deformed.
        block: String,
        /// Point count before the stage.
        before: usize,
        /// Point count after the stage.
        after: usize,
    },

    /// Generic drafting error
    #[error("Draft error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Export error type
///
/// Represents failures while serializing a `PatternDocument` to an
/// interchange format. Export failures are recoverable: they never
/// corrupt the in-memory document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The document contains no exportable pieces
    #[error("Document '{style_name}' has no pieces with geometry")]
    EmptyDocument {
        /// Style name of the rejected document.
        style_name: String,
    },

    /// Failure constructing the output byte stream
    #[error("Failed to encode {format} output: {reason}")]
    Encode {
        /// The output format ("dxf" or "pdf").
        format: &'static str,
        /// The reason encoding failed.
        reason: String,
    },

    /// Failure writing the output to disk
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline error type
///
/// Represents recompute-session failures. A failed recompute leaves the
/// previously published document in place.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// The session worker has shut down
    #[error("Recompute session is closed")]
    SessionClosed,

    /// The background computation panicked or was cancelled by the runtime
    #[error("Background computation failed: {reason}")]
    ComputeFailed {
        /// The reason the computation failed.
        reason: String,
    },
}

/// Top-level error type for PatternKit.
#[derive(Error, Debug)]
pub enum Error {
    /// Drafting error.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Export error.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Pipeline error.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for PatternKit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_error_display() {
        let err = DraftError::EmptyBlock {
            block: "Bodice Front".to_string(),
        };
        assert_eq!(err.to_string(), "Block 'Bodice Front' contains no control points");
    }

    #[test]
    fn export_error_display() {
        let err = ExportError::Encode {
            format: "pdf",
            reason: "zero-length content stream".to_string(),
        };
        assert!(err.to_string().contains("pdf"));
        assert!(err.to_string().contains("zero-length"));
    }

    #[test]
    fn errors_convert_to_top_level() {
        let err: Error = PipelineError::SessionClosed.into();
        assert_eq!(err.to_string(), "Recompute session is closed");
    }
}
