//! Event kinds, listener ids and listener signatures.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ListenerError;
use crate::sequence::ObservableVec;

/// The three notification kinds a sequence emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// An element was added. Payload: `(value, index)`.
    Inserted,
    /// An element was removed. Payload: `(value, index before removal)`.
    Removed,
    /// A slot changed value. Payload: `(new, old, index)`.
    Changed,
}

impl ChangeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::Inserted, Self::Removed, Self::Changed];

    /// Stable lowercase name, used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by listener registration, used to unsubscribe.
///
/// Ids are unique for the lifetime of the process, so an id from one
/// sequence never removes a listener from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Stored form of an inserted listener.
pub type InsertedFn<T> = dyn Fn(&ObservableVec<T>, &T, usize) -> Result<(), ListenerError>;

/// Stored form of a removed listener. `None` marks a removal miss.
pub type RemovedFn<T> = dyn Fn(&ObservableVec<T>, &T, Option<usize>) -> Result<(), ListenerError>;

/// Stored form of a changed listener: `(sequence, new, old, index)`.
pub type ChangedFn<T> = dyn Fn(&ObservableVec<T>, &T, &T, usize) -> Result<(), ListenerError>;
