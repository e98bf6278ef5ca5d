//! Errors surfaced while decoding, rendering and writing reports.

use std::path::PathBuf;

/// Errors that can occur between reading the input record and writing the document.
#[derive(Debug)]
pub enum ReportError {
    /// The input record could not be decoded from JSON.
    Parse(serde_json::Error),
    /// Strict validation rejected the record; one message per problem.
    Validation(Vec<String>),
    /// The element tree could not be packed into a DOCX archive.
    Pack(String),
    /// The output file could not be written.
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to parse input record: {err}"),
            Self::Validation(issues) => {
                write!(f, "Input record is incomplete: {}", issues.join("; "))
            }
            Self::Pack(message) => write!(f, "Failed to pack DOCX document: {message}"),
            Self::Io { path, .. } => write!(f, "Failed to write {}", path.display()),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Validation(_) | Self::Pack(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_error_exposes_source() {
        let err = ReportError::Io {
            path: PathBuf::from("/missing/out.docx"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(err.to_string(), "Failed to write /missing/out.docx");
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_lists_every_issue() {
        let err = ReportError::Validation(vec!["`title` is empty".into(), "`price` is empty".into()]);
        assert_eq!(
            err.to_string(),
            "Input record is incomplete: `title` is empty; `price` is empty"
        );
    }
}
