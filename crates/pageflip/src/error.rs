#![forbid(unsafe_code)]

//! Unified error type for pageflip hosts.
//!
//! Each variant wraps one subsystem's error so a host can use `?` across the
//! whole API and still match on what matters.

use std::fmt;

use pageflip_runtime::error::{BookConfigError, BookError};

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Lifecycle or navigation failure.
    Book(BookError),
    /// Configuration could not be loaded.
    Config(BookConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for pageflip APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs and metrics.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Book(BookError::NotOpen) => "book.not_open",
            Self::Book(BookError::NoPages) => "book.no_pages",
            Self::Book(BookError::InvalidConfig(_)) => "book.invalid_config",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Whether the host can carry on (possibly after reopening) without
    /// fixing its setup.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Book(BookError::NotOpen))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book(e) => write!(f, "book error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Book(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<BookError> for Error {
    fn from(e: BookError) -> Self {
        Self::Book(e)
    }
}

impl From<BookConfigError> for Error {
    fn from(e: BookConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails() -> Result<()> {
        Err(BookError::NotOpen)?;
        Ok(())
    }

    #[test]
    fn question_mark_converts_book_errors() {
        let err = fails().expect_err("fails");
        assert_eq!(err.error_type(), "book.not_open");
        assert!(err.is_recoverable());
    }

    #[test]
    fn setup_errors_are_not_recoverable() {
        assert!(!Error::from(BookError::NoPages).is_recoverable());
        let err = Error::from(BookConfigError::Validation(vec!["x".into()]));
        assert_eq!(err.error_type(), "config");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("validation errors: x"));
    }
}
