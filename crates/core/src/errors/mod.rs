//! Error types for resource lifecycle operations

mod builders;
mod display;
mod failures;
mod types;

pub use failures::{ReleaseError, ReleaseFailures};
pub use types::{BoxError, Error, Result};
