//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Url(url::ParseError),
    /// Invalid or contradictory configuration, raised before any processing.
    Config(String),
    /// Record source columns do not match the expected schema.
    Schema {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// A normalization step failed with an error kind that is not recoverable for it.
    Normalization {
        step: &'static str,
        kind: String,
        message: String,
    },
    /// Internal bookkeeping mismatch. Points to a bug upstream or in the resolver.
    Consistency(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {}", e),
            Error::Url(e) => write!(f, "invalid url: {}", e),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Schema { expected, found } => write!(
                f,
                "data schema consisting of columns {} doesn't match expected columns {}",
                found.join(", "),
                expected.join(", ")
            ),
            Error::Normalization {
                step,
                kind,
                message,
            } => write!(f, "exception of kind {} occurred in {}: {}", kind, step, message),
            Error::Consistency(msg) => write!(f, "internal consistency error: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Glob(e) => Some(e),
            Error::GlobPattern(e) => Some(e),
            Error::Url(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
