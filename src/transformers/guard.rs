/*! Failure policy for transforms.

A [Guarded] transform wraps another [Transform] with an allow-list of recoverable [FailureKind]s:

- a failure whose kind is allow-listed is logged and the input is returned untouched,
- a failure whose kind is not allow-listed aborts with [Error::Normalization],
- an empty allow-list recovers from every failure. This is flagged once, at construction.
!*/
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};

use super::transform::{FailureKind, Transform};
use crate::error::Error;

pub struct Guarded {
    inner: Box<dyn Transform + Send + Sync>,
    recoverable: Vec<FailureKind>,
    fallbacks: AtomicUsize,
}

impl Guarded {
    pub fn new(inner: Box<dyn Transform + Send + Sync>, recoverable: Vec<FailureKind>) -> Self {
        if recoverable.is_empty() {
            warn!(
                "[{}] no recoverable failure kinds given: every failure will be ignored and the input returned as is",
                inner.name()
            );
        }
        Self {
            inner,
            recoverable,
            fallbacks: AtomicUsize::new(0),
        }
    }

    /// Guard that recovers from every failure.
    pub fn lenient(inner: Box<dyn Transform + Send + Sync>) -> Self {
        Self::new(inner, Vec::new())
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Number of times the input was returned untouched because of a recovered failure.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn apply(&self, text: &str) -> Result<String, Error> {
        match self.inner.transform(text) {
            Ok(transformed) => Ok(transformed),
            Err(e) if self.recoverable.is_empty() || self.recoverable.contains(&e.kind()) => {
                // first occurrence is a warning, the rest would only flood the logs
                if self.fallbacks.fetch_add(1, Ordering::Relaxed) == 0 {
                    warn!(
                        "[{}] an exception of {} occurred ({}), returning the input as it is",
                        self.name(),
                        e.kind(),
                        e.message()
                    );
                } else {
                    debug!("[{}] recovered from {}", self.name(), e);
                }
                Ok(text.to_string())
            }
            Err(e) => Err(Error::Normalization {
                step: self.name(),
                kind: e.kind().to_string(),
                message: e.message().to_string(),
            }),
        }
    }
}
