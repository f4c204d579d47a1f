//! Core types, errors, and constants shared by the `infra` crates.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   along with the release-failure records (`ReleaseError`,
//!   `ReleaseFailures`) that aggregate errors carry.
//! - **`separator`**: A small helper for joining items with a separator that
//!   is blank before the first item.
//! - **`constants`**: Shared defaults such as the resource manager name and
//!   the logging environment variable.

pub mod constants;
pub mod errors;
pub mod separator;

pub use self::{
    constants::*,
    errors::{BoxError, Error, ReleaseError, ReleaseFailures, Result},
    separator::Separator,
};
