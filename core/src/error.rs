//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors without path context.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The source schema could not be opened or read.
    #[from(ignore)]
    #[display("Failed to read {}: {error}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO failure.
        error: std::io::Error,
    },

    /// The destination schema could not be written.
    #[from(ignore)]
    #[display("Failed to write {}: {error}", path.display())]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying IO failure.
        error: std::io::Error,
    },

    /// Source bytes are not valid in the configured encoding.
    #[from(ignore)]
    #[display("Encoding Error: {_0}")]
    Encoding(String),

    /// The schema text could not be parsed into blocks and fields.
    #[from(ignore)]
    #[display("Parse Error (line {line}): {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The insertion point was not found.
    #[from(ignore)]
    #[display("Insertion point not found: {_0}")]
    NoMatch(String),

    /// The insertion point occurs more than once.
    #[from(ignore)]
    #[display("Insertion point is ambiguous ({count} matches): {message}")]
    AmbiguousMatch {
        /// Number of candidate locations.
        count: usize,
        /// Description of the anchor.
        message: String,
    },

    /// Invalid or unreadable configuration.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Read { error, .. } | AppError::Write { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = AppError::Read {
            path: PathBuf::from("missing/schema.prisma"),
            error: Error::new(ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing/schema.prisma"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_ambiguous_display() {
        let err = AppError::AmbiguousMatch {
            count: 2,
            message: "field 'language'".into(),
        };
        assert_eq!(
            err.to_string(),
            "Insertion point is ambiguous (2 matches): field 'language'"
        );
    }
}
