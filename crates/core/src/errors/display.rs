//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSavepoint {
                savepoint,
                owner,
                manager,
            } => {
                write!(
                    f,
                    "invalid savepoint #{savepoint}: created by resource manager {owner}, not {manager}"
                )
            }
            Error::SavepointNotFound { savepoint } => {
                write!(f, "savepoint #{savepoint} is not registered")
            }
            Error::Rollback(failures) => {
                write!(f, "rollback failed: {failures}")
            }
            Error::Teardown(failures) => {
                write!(f, "failed to close resource manager: {failures}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
