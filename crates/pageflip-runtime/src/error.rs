#![forbid(unsafe_code)]

//! Runtime errors.

use std::fmt;

/// Book lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// An operation that needs an open book was called before `open`.
    NotOpen,
    /// The host supplied no page views.
    NoPages,
    /// The configuration failed validation.
    InvalidConfig(Vec<String>),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => write!(f, "book is not open"),
            Self::NoPages => write!(f, "host supplied no page views"),
            Self::InvalidConfig(errors) => {
                write!(f, "invalid book configuration: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for BookError {}

/// Errors that can occur when loading a book configuration.
#[derive(Debug)]
pub enum BookConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "book-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "book-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for BookConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "book-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "book-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for BookConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "book-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "book-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_problem() {
        let err = BookError::InvalidConfig(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid book configuration: a; b");
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error as _;
        let err = BookConfigError::Io(std::io::Error::other("gone"));
        assert!(err.source().is_some());
        assert!(BookConfigError::Validation(vec![]).source().is_none());
    }
}
