//! Core error type definitions

use super::failures::ReleaseFailures;

/// Result type alias for infra operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed, thread-safe dynamic error used for caller-supplied failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for infra operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Savepoint handle that was not minted by the manager it was passed to
    InvalidSavepoint {
        savepoint: u64,
        owner: u64,
        manager: u64,
    },

    /// Savepoint handle that is no longer on the stack
    SavepointNotFound { savepoint: u64 },

    /// One or more release actions failed while rolling back to a savepoint
    Rollback(#[source] ReleaseFailures),

    /// One or more release actions failed while tearing down the manager
    Teardown(#[source] ReleaseFailures),

    /// Configuration errors
    Configuration { message: String },
}

impl Error {
    /// Release failures carried by an aggregate error, in release order
    pub fn release_failures(&self) -> Option<&ReleaseFailures> {
        match self {
            Error::Rollback(failures) | Error::Teardown(failures) => Some(failures),
            _ => None,
        }
    }

    /// Whether this error is a caller-contract violation rather than a
    /// release failure
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidSavepoint { .. } | Error::SavepointNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReleaseError;
    use std::error::Error as _;

    #[test]
    fn test_contract_violations_carry_no_failures() {
        let err = Error::savepoint_not_found(3);
        assert!(err.is_contract_violation());
        assert!(err.release_failures().is_none());
        assert_eq!(err.to_string(), "savepoint #3 is not registered");
    }

    #[test]
    fn test_aggregate_error_exposes_primary_cause() {
        let failures = ReleaseFailures::from_vec(vec![
            ReleaseError::new("second", "boom"),
            ReleaseError::new("first", "bang"),
        ])
        .unwrap();
        let err = Error::teardown(failures);

        assert!(!err.is_contract_violation());
        assert_eq!(err.release_failures().unwrap().len(), 2);
        let primary = err.source().and_then(|s| s.source()).unwrap();
        assert_eq!(primary.to_string(), "failed to release second: boom");
    }
}
