//! Stack-based registry of resources and their release actions.

use super::config::ManagerConfig;
use super::entry::{Disposer, Entry};
use super::release::Release;
use infra_core::{BoxError, Error, ReleaseError, ReleaseFailures, Result, DEFERRED_ACTION_LABEL};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, trace, warn};

/// Source of manager identities, so handles from one manager are rejected by another
static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a savepoint created by [`ResourceManager::savepoint`].
///
/// The handle stays valid until the savepoint is consumed by a rollback or
/// by teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Savepoint {
    id: u64,
    owner: u64,
}

impl Savepoint {
    /// Identifier of this savepoint, unique within its manager
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Savepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "savepoint #{}", self.id)
    }
}

/// Tracks acquired resources and releases them in reverse order.
///
/// Every registered resource is released exactly once, either by
/// [`rollback`](Self::rollback) to a savepoint created before it or by
/// [`close`](Self::close). A failing release never stops the remaining ones;
/// all failures of one rollback or teardown are reported together.
///
/// Dropping the manager closes it. Failures during drop cannot propagate and
/// are logged instead, so call [`close`](Self::close) explicitly (or use
/// [`scope`](super::scope)) when release failures matter.
///
/// Acquired values are handed back to the caller as clones while the
/// manager keeps the registered copy, so resources are typically cheap
/// handles such as `Arc`s or ids.
pub struct ResourceManager {
    entries: Vec<Entry>,
    next_savepoint: u64,
    id: u64,
    config: ManagerConfig,
}

impl ResourceManager {
    /// Create an empty manager with the default configuration
    pub fn new() -> Self {
        Self::build(ManagerConfig::default())
    }

    /// Create an empty manager with the given configuration
    pub fn with_config(config: ManagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ManagerConfig) -> Self {
        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            next_savepoint: 0,
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            config,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Number of entries on the stack, savepoints included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `savepoint` belongs to this manager and can still be rolled back to
    pub fn contains(&self, savepoint: &Savepoint) -> bool {
        savepoint.owner == self.id
            && self
                .entries
                .iter()
                .any(|entry| entry.savepoint_id() == Some(savepoint.id))
    }

    /// Acquire a resource and register its release action.
    ///
    /// A producer error is returned unchanged and nothing is registered.
    pub fn acquire<T, E, P, R, RE>(&mut self, producer: P, release: R) -> std::result::Result<T, E>
    where
        T: Clone + Send + 'static,
        P: FnOnce() -> std::result::Result<T, E>,
        R: FnOnce(T) -> std::result::Result<(), RE> + Send + 'static,
        RE: Into<BoxError>,
    {
        let resource = producer()?;
        self.register(resource.clone(), release);
        Ok(resource)
    }

    /// Like [`acquire`](Self::acquire), for producers that may yield no resource.
    ///
    /// `Ok(None)` registers nothing and is returned as is.
    pub fn acquire_nullable<T, E, P, R, RE>(
        &mut self,
        producer: P,
        release: R,
    ) -> std::result::Result<Option<T>, E>
    where
        T: Clone + Send + 'static,
        P: FnOnce() -> std::result::Result<Option<T>, E>,
        R: FnOnce(T) -> std::result::Result<(), RE> + Send + 'static,
        RE: Into<BoxError>,
    {
        let resource = producer()?;
        if let Some(value) = &resource {
            self.register(value.clone(), release);
        }
        Ok(resource)
    }

    /// Acquire a resource whose absence is acceptable.
    ///
    /// A producer error yields `None`; the error is only logged.
    pub fn acquire_optional<T, E, P, R, RE>(&mut self, producer: P, release: R) -> Option<T>
    where
        T: Clone + Send + 'static,
        E: fmt::Display,
        P: FnOnce() -> std::result::Result<T, E>,
        R: FnOnce(T) -> std::result::Result<(), RE> + Send + 'static,
        RE: Into<BoxError>,
    {
        self.acquire_optional_nullable(|| producer().map(Some), release)
    }

    /// Optional acquisition for producers that may also yield no resource
    pub fn acquire_optional_nullable<T, E, P, R, RE>(&mut self, producer: P, release: R) -> Option<T>
    where
        T: Clone + Send + 'static,
        E: fmt::Display,
        P: FnOnce() -> std::result::Result<Option<T>, E>,
        R: FnOnce(T) -> std::result::Result<(), RE> + Send + 'static,
        RE: Into<BoxError>,
    {
        match self.acquire_nullable(producer, release) {
            Ok(resource) => resource,
            Err(e) => {
                debug!(
                    manager = %self.config.name,
                    resource = std::any::type_name::<T>(),
                    "Optional resource not acquired: {e}"
                );
                None
            }
        }
    }

    /// Acquire a cloneable handle that knows how to release itself.
    ///
    /// For resources that cannot be cloned, such as temporary directories or
    /// child processes, use [`acquire_managed_with`](Self::acquire_managed_with).
    pub fn acquire_managed<T, E, P>(&mut self, producer: P) -> std::result::Result<T, E>
    where
        T: Release + Clone + Send + 'static,
        P: FnOnce() -> std::result::Result<T, E>,
    {
        self.acquire(producer, T::release)
    }

    /// Acquire a resource that knows how to release itself and keep it
    /// registered, returning what `inspect` extracts from it.
    ///
    /// ```rust
    /// use infra_utils::ResourceManager;
    ///
    /// let mut rm = ResourceManager::new();
    /// let path = rm
    ///     .acquire_managed_with(tempfile::tempdir, |dir| dir.path().to_path_buf())
    ///     .unwrap();
    /// assert!(path.exists());
    ///
    /// rm.close().unwrap();
    /// assert!(!path.exists());
    /// ```
    pub fn acquire_managed_with<T, E, P, F, V>(
        &mut self,
        producer: P,
        inspect: F,
    ) -> std::result::Result<V, E>
    where
        T: Release + Send + 'static,
        P: FnOnce() -> std::result::Result<T, E>,
        F: FnOnce(&T) -> V,
    {
        let resource = producer()?;
        let view = inspect(&resource);
        self.manage(resource);
        Ok(view)
    }

    /// Register an already acquired resource with its release action
    pub fn register<T, R, E>(&mut self, resource: T, release: R)
    where
        T: Send + 'static,
        R: FnOnce(T) -> std::result::Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        let label = std::any::type_name::<T>();
        self.push(Entry::Cleanup(Disposer::new(label, resource, release)));
    }

    /// Register a resource that knows how to release itself
    pub fn manage<T>(&mut self, resource: T)
    where
        T: Release + Send + 'static,
    {
        self.register(resource, T::release);
    }

    /// Register an action to run on rollback or teardown
    pub fn register_action<A, E>(&mut self, action: A)
    where
        A: FnOnce() -> std::result::Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        self.push(Entry::Cleanup(Disposer::action(DEFERRED_ACTION_LABEL, action)));
    }

    /// Register an action that cannot fail
    pub fn defer<A>(&mut self, action: A)
    where
        A: FnOnce() + Send + 'static,
    {
        self.register_action(move || {
            action();
            Ok::<(), BoxError>(())
        });
    }

    /// Mark the current top of the stack.
    ///
    /// If the top entry already is a savepoint, its handle is returned and
    /// the stack is left unchanged.
    pub fn savepoint(&mut self) -> Savepoint {
        if let Some(id) = self.entries.last().and_then(Entry::savepoint_id) {
            return Savepoint { id, owner: self.id };
        }

        let id = self.next_savepoint;
        self.next_savepoint += 1;
        self.entries.push(Entry::Savepoint(id));
        debug!(
            manager = %self.config.name,
            savepoint = id,
            depth = self.entries.len(),
            "Created savepoint"
        );

        Savepoint { id, owner: self.id }
    }

    /// Release every entry registered after `savepoint`, then consume it.
    ///
    /// Entries below the savepoint stay registered. Fails without touching
    /// the stack if the handle belongs to another manager or was already
    /// consumed.
    pub fn rollback(&mut self, savepoint: &Savepoint) -> Result<()> {
        if savepoint.owner != self.id {
            return Err(Error::invalid_savepoint(savepoint.id, savepoint.owner, self.id));
        }
        if !self.contains(savepoint) {
            return Err(Error::savepoint_not_found(savepoint.id));
        }

        debug!(
            manager = %self.config.name,
            savepoint = savepoint.id,
            "Rolling back to savepoint"
        );

        let mut failures = Vec::new();
        while let Some(entry) = self.entries.pop() {
            match entry {
                Entry::Savepoint(id) if id == savepoint.id => break,
                Entry::Savepoint(id) => {
                    trace!(manager = %self.config.name, savepoint = id, "Discarded nested savepoint");
                }
                Entry::Cleanup(disposer) => self.release(disposer, &mut failures),
            }
        }

        match ReleaseFailures::from_vec(failures) {
            Some(failures) => Err(Error::rollback(failures)),
            None => Ok(()),
        }
    }

    /// Release every remaining entry.
    ///
    /// Closing an empty manager does nothing, so calling this more than once
    /// is safe.
    pub fn close(&mut self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }

        debug!(
            manager = %self.config.name,
            entries = self.entries.len(),
            "Closing resource manager"
        );

        let mut failures = Vec::new();
        while let Some(entry) = self.entries.pop() {
            match entry {
                Entry::Savepoint(_) => {}
                Entry::Cleanup(disposer) => self.release(disposer, &mut failures),
            }
        }

        match ReleaseFailures::from_vec(failures) {
            Some(failures) => Err(Error::teardown(failures)),
            None => Ok(()),
        }
    }

    fn push(&mut self, entry: Entry) {
        if let Entry::Cleanup(disposer) = &entry {
            trace!(
                manager = %self.config.name,
                resource = disposer.label(),
                depth = self.entries.len() + 1,
                "Registered cleanup"
            );
        }
        self.entries.push(entry);
    }

    fn release(&self, disposer: Disposer, failures: &mut Vec<ReleaseError>) {
        let label = self
            .config
            .log_releases
            .then(|| disposer.label().to_owned());
        match disposer.run() {
            Ok(()) => {
                if let Some(label) = label {
                    debug!(manager = %self.config.name, resource = %label, "Released resource");
                }
            }
            Err(e) => {
                warn!(
                    manager = %self.config.name,
                    resource = %e.resource,
                    "Release failed: {}",
                    e.source
                );
                failures.push(e);
            }
        }
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("name", &self.config.name)
            .field("id", &self.id)
            .field("entries", &self.entries)
            .finish()
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!(manager = %self.config.name, "{e}");
            if let Some(failures) = e.release_failures() {
                for failure in failures {
                    error!(
                        manager = %self.config.name,
                        resource = %failure.resource,
                        "Unreported release failure: {}",
                        failure.source
                    );
                }
            }
        }
    }
}
