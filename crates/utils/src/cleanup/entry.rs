//! Stack entries held by the resource manager.

use infra_core::{BoxError, ReleaseError};
use std::borrow::Cow;
use std::fmt;

type ReleaseFn = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

/// A release action bound to the value it releases.
///
/// The value is captured by the boxed closure, so entries for different
/// resource types share one concrete type on the stack.
pub(crate) struct Disposer {
    label: Cow<'static, str>,
    release: ReleaseFn,
}

impl Disposer {
    pub(crate) fn new<T, R, E>(label: impl Into<Cow<'static, str>>, value: T, release: R) -> Self
    where
        T: Send + 'static,
        R: FnOnce(T) -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        Self {
            label: label.into(),
            release: Box::new(move || release(value).map_err(Into::into)),
        }
    }

    pub(crate) fn action<A, E>(label: impl Into<Cow<'static, str>>, action: A) -> Self
    where
        A: FnOnce() -> Result<(), E> + Send + 'static,
        E: Into<BoxError>,
    {
        Self {
            label: label.into(),
            release: Box::new(move || action().map_err(Into::into)),
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Run the release action, consuming the entry
    pub(crate) fn run(self) -> Result<(), ReleaseError> {
        let Disposer { label, release } = self;
        release().map_err(|source| ReleaseError::new(label, source))
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// One unit on the manager's stack
#[derive(Debug)]
pub(crate) enum Entry {
    /// Release action for a registered resource or deferred action
    Cleanup(Disposer),
    /// Marker that a rollback can unwind to
    Savepoint(u64),
}

impl Entry {
    pub(crate) fn savepoint_id(&self) -> Option<u64> {
        match self {
            Entry::Savepoint(id) => Some(*id),
            Entry::Cleanup(_) => None,
        }
    }
}
