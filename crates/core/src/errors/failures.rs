//! Release failure records collected during rollback and teardown

use super::types::BoxError;
use crate::separator::Separator;
use std::fmt;

/// A single release action that failed
#[derive(Debug, thiserror::Error)]
#[error("failed to release {resource}: {source}")]
pub struct ReleaseError {
    /// Label of the entry whose release failed
    pub resource: String,
    /// Error returned by the release action
    #[source]
    pub source: BoxError,
}

impl ReleaseError {
    /// Create a release error for the labelled entry
    #[must_use]
    pub fn new(resource: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            resource: resource.into(),
            source: source.into(),
        }
    }
}

/// Every release failure of one rollback or teardown, in release order.
///
/// The list is never empty. The first failure is the primary cause and the
/// remaining ones are suppressed causes.
#[derive(Debug)]
pub struct ReleaseFailures {
    failures: Vec<ReleaseError>,
}

impl ReleaseFailures {
    /// Wrap the collected failures, or `None` when nothing failed
    pub fn from_vec(failures: Vec<ReleaseError>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// First failure in release order
    pub fn primary(&self) -> &ReleaseError {
        &self.failures[0]
    }

    /// Failures that occurred after the primary one
    pub fn suppressed(&self) -> &[ReleaseError] {
        &self.failures[1..]
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether no failure was recorded
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReleaseError> {
        self.failures.iter()
    }

    pub fn into_vec(self) -> Vec<ReleaseError> {
        self.failures
    }
}

impl fmt::Display for ReleaseFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.failures.len();
        let noun = if count == 1 { "action" } else { "actions" };
        write!(f, "{count} release {noun} failed (")?;
        let sep = Separator::new("; ");
        for failure in &self.failures {
            write!(f, "{sep}{failure}")?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ReleaseFailures {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.primary())
    }
}

impl<'a> IntoIterator for &'a ReleaseFailures {
    type Item = &'a ReleaseError;
    type IntoIter = std::slice::Iter<'a, ReleaseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}
