//! Error types for chart rendering.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for chrdlib operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Problems met while interpreting a chart. Line numbers are 1-based.
///
/// `Config` and `Unsupported` abort the render. `Syntax` and
/// `UnknownDirective` are collected as diagnostics and rendering carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartError {
    /// `#pop` with no matching `#push`.
    #[error("line {line}: '{text}' has no matching #push")]
    Config { line: usize, text: String },

    /// A barline, repeat or signature token in a position it cannot apply.
    #[error("line {line}: invalid token '{token}'")]
    Syntax { line: usize, token: String },

    /// A recognised directive that is not implemented yet.
    #[error("line {line}: '{directive}' is not yet supported")]
    Unsupported { line: usize, directive: String },

    #[error("line {line}: unrecognised directive '{directive}'")]
    UnknownDirective { line: usize, directive: String },

    /// Output serialisation failed.
    #[error("JSON serialization error: {message}")]
    Json { message: String },
}

impl ChartError {
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ChartError::Syntax { .. } | ChartError::UnknownDirective { .. }
        )
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            ChartError::Config { line, .. }
            | ChartError::Syntax { line, .. }
            | ChartError::Unsupported { line, .. }
            | ChartError::UnknownDirective { line, .. } => Some(*line),
            ChartError::Json { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::Json { message: e.to_string() }
    }
}
