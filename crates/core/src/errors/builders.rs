//! Builder methods for creating errors with context

use super::failures::ReleaseFailures;
use super::types::Error;

impl Error {
    /// Create an error for a savepoint that belongs to another manager
    #[must_use]
    pub fn invalid_savepoint(savepoint: u64, owner: u64, manager: u64) -> Self {
        Error::InvalidSavepoint {
            savepoint,
            owner,
            manager,
        }
    }

    /// Create an error for a savepoint that was already consumed
    #[must_use]
    pub fn savepoint_not_found(savepoint: u64) -> Self {
        Error::SavepointNotFound { savepoint }
    }

    /// Create a rollback failure from the collected release failures
    #[must_use]
    pub fn rollback(failures: ReleaseFailures) -> Self {
        Error::Rollback(failures)
    }

    /// Create a teardown failure from the collected release failures
    #[must_use]
    pub fn teardown(failures: ReleaseFailures) -> Self {
        Error::Teardown(failures)
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
