//! Error types for selector parsing and processing.

use thiserror::Error;

/// Errors that can occur while parsing or transforming selectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcssError {
    /// A user-visible selector error: bad selector syntax, a `&` outside
    /// any enclosing rule, an invalid parent composition, or an `@extend`
    /// loop.
    #[error("{message}")]
    Syntax {
        message: String,
        /// 1-based source line the error is attributed to (0 when unknown).
        line: usize,
        filename: Option<String>,
    },

    /// A broken internal invariant. Seeing one of these means the caller
    /// handed the algebra an unresolved selector, or there is a bug in
    /// this crate.
    #[error("[BUG] {0}")]
    Internal(String),
}

impl PcssError {
    pub fn syntax(message: impl Into<String>, line: usize, filename: Option<String>) -> Self {
        PcssError::Syntax {
            message: message.into(),
            line,
            filename,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PcssError::Internal(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PcssError>;
