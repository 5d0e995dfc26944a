//! Transform trait.
use std::fmt;

/// Kind of failure a [Transform] can report.
///
/// Guards match on these kinds to decide whether a failure is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Input could not be parsed (e.g. malformed markup).
    Parse,
    /// Input could not be encoded into the target representation.
    Encode,
    /// Input could not be decoded.
    Decode,
}

impl FailureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::Parse => "parseerror",
            FailureKind::Encode => "encodeerror",
            FailureKind::Decode => "decodeerror",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformError {
    kind: FailureKind,
    message: String,
}

impl TransformError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Parse, message)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A pure text to text transformation.
///
/// Two successive calls with equal inputs must yield equal outputs.
pub trait Transform {
    /// Step name, used in logs and errors.
    fn name(&self) -> &'static str;

    fn transform(&self, text: &str) -> Result<String, TransformError>;
}
