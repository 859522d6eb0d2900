//! Error types for corpus loading and closure computation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::base::Position;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A syntax error located in a source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub position: Position,
    pub message: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// Errors that abort an analysis run.
///
/// Unresolved references and empty seeds are not errors: the first is
/// skipped silently, the second yields an empty closure.
#[derive(Debug, Error)]
pub enum Error {
    /// The corpus root is missing or not a directory.
    #[error("corpus root {} does not exist or is not a directory", .path.display())]
    RootNotFound { path: PathBuf },

    /// A directory or source file could not be read.
    #[error("failed to read {}", .path.display())]
    CorpusLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source unit has syntax errors.
    #[error("{} has {} syntax error(s), first at {}", .path.display(), .errors.len(), first_error(.errors))]
    Parse {
        path: PathBuf,
        errors: Vec<ParseDiagnostic>,
    },

    /// No unique source unit matches a direct-mode selector.
    #[error("no unique source unit matches `{selector}` ({} candidate(s))", .candidates.len())]
    UnitNotFound {
        selector: String,
        candidates: Vec<PathBuf>,
    },

    /// A reference catalog line is malformed.
    #[error("{}:{line}: {message}", .path.display())]
    Catalog {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A reference catalog file could not be read.
    #[error("failed to read reference catalog {}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The closure would visit more units than the configured limit.
    #[error("closure exceeds the limit of {limit} source unit(s)")]
    UnitLimitExceeded { limit: usize },
}

fn first_error(errors: &[ParseDiagnostic]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl Error {
    pub(crate) fn corpus_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CorpusLoad {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn catalog(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Catalog {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_first_error() {
        let err = Error::Parse {
            path: PathBuf::from("src/Order.cs"),
            errors: vec![
                ParseDiagnostic {
                    position: Position { line: 2, column: 4 },
                    message: "expected `;`".to_string(),
                },
                ParseDiagnostic {
                    position: Position { line: 9, column: 0 },
                    message: "expected `}`".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "src/Order.cs has 2 syntax error(s), first at 3:5: expected `;`"
        );
    }

    #[test]
    fn test_catalog_error_message() {
        let err = Error::catalog("refs.txt", 7, "invalid identifier `1List`");
        assert_eq!(err.to_string(), "refs.txt:7: invalid identifier `1List`");
    }

    #[test]
    fn test_unit_limit_message() {
        let err = Error::UnitLimitExceeded { limit: 3 };
        assert_eq!(err.to_string(), "closure exceeds the limit of 3 source unit(s)");
    }
}
