//! Scoped resource lifecycle management.
//!
//! A [`ResourceManager`] keeps a stack of release actions. Resources are
//! registered as they are acquired and released in reverse order, either
//! all at once by [`ResourceManager::close`] (or on drop) or down to a
//! [`Savepoint`] by [`ResourceManager::rollback`].
//!
//! ## Architecture
//!
//! - [`config`] - Manager configuration
//! - `entry` - Stack entries (cleanup bindings and savepoint markers)
//! - [`manager`] - The registry and its savepoint handles
//! - [`release`] - The [`Release`] trait and its implementations
//! - [`scope`](mod@scope) - Closure-scoped manager with guaranteed teardown
//!
//! ## Examples
//!
//! ```rust
//! use infra_utils::cleanup::ResourceManager;
//! use std::sync::{Arc, Mutex};
//!
//! let released = Arc::new(Mutex::new(Vec::new()));
//! let mut rm = ResourceManager::new();
//!
//! for name in ["config", "connection", "cursor"] {
//!     let log = Arc::clone(&released);
//!     rm.register(name, move |n| {
//!         log.lock().unwrap().push(n);
//!         Ok::<(), infra_core::BoxError>(())
//!     });
//! }
//!
//! let sp = rm.savepoint();
//! rm.defer(|| println!("temporary work undone"));
//! rm.rollback(&sp).unwrap();
//!
//! rm.close().unwrap();
//! assert_eq!(*released.lock().unwrap(), vec!["cursor", "connection", "config"]);
//! ```

pub mod config;
mod entry;
pub mod manager;
pub mod release;
pub mod scope;

pub use config::ManagerConfig;
pub use manager::{ResourceManager, Savepoint};
pub use release::Release;
pub use scope::scope;
