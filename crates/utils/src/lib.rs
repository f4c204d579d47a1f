//! Shared utilities for the infra workspace
//!
//! The main piece is the [`cleanup`] module, a stack-based registry that
//! releases acquired resources in reverse order with savepoint support.

pub mod cleanup;
pub mod logging;

pub use cleanup::{scope, ManagerConfig, Release, ResourceManager, Savepoint};
pub use infra_core::Separator;
