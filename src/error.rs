//! Error types for the cadpreview library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cadpreview operations
#[derive(Debug, Error)]
pub enum PreviewError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source drawing file does not exist
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// File extension is not a supported drawing format
    #[error("Unsupported drawing format: {0}")]
    UnsupportedFormat(String),

    /// DXF content is structurally broken (section framing, code lines)
    #[error("Corrupted drawing content: {0}")]
    ParseCorrupted(String),

    /// No external DWG converter is installed
    #[error("External converter unavailable: {0}")]
    ToolUnavailable(String),

    /// External converter ran but produced no usable output
    #[error("External converter failed: {0}")]
    ToolFailed(String),

    /// External converter exceeded its deadline and was killed
    #[error("External converter {tool} timed out after {secs}s")]
    ToolTimeout {
        /// Name of the tool that was killed
        tool: String,
        /// Configured deadline in seconds
        secs: u64,
    },

    /// Failed to persist a rendered artifact to the cache
    ///
    /// Never surfaced to callers as a conversion failure; the
    /// orchestrator downgrades it to a warning.
    #[error("Cache write failed: {0}")]
    CacheWrite(String),
}

/// Result type alias for cadpreview operations
pub type Result<T> = std::result::Result<T, PreviewError>;

impl PreviewError {
    /// `true` for error kinds that the conversion orchestrator recovers
    /// from locally (external tool problems); `false` for errors that
    /// must be surfaced to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PreviewError::ToolUnavailable(_)
                | PreviewError::ToolFailed(_)
                | PreviewError::ToolTimeout { .. }
                | PreviewError::CacheWrite(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PreviewError::UnsupportedFormat("step".to_string());
        assert_eq!(err.to_string(), "Unsupported drawing format: step");
    }

    #[test]
    fn test_timeout_display() {
        let err = PreviewError::ToolTimeout {
            tool: "ODAFileConverter".to_string(),
            secs: 30,
        };
        assert!(err.to_string().contains("ODAFileConverter"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PreviewError = io_err.into();
        assert!(matches!(err, PreviewError::Io(_)));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(PreviewError::ToolUnavailable("x".into()).is_recoverable());
        assert!(PreviewError::ToolFailed("x".into()).is_recoverable());
        assert!(!PreviewError::SourceNotFound(PathBuf::from("a.dwg")).is_recoverable());
        assert!(!PreviewError::ParseCorrupted("bad".into()).is_recoverable());
    }
}
