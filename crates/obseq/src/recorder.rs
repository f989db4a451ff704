//! Event recorder for tests (feature `test-helpers`).
//!
//! [`EventRecorder::attach`] registers one listener per event kind and keeps
//! an owned copy of every notification together with the sequence length
//! observed inside the listener.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{ChangeKind, ListenerId};
use crate::sequence::ObservableVec;

/// An owned copy of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent<T> {
    Inserted { value: T, index: usize },
    Removed { value: T, index: Option<usize> },
    Changed { new: T, old: T, index: usize },
}

impl<T> RecordedEvent<T> {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Inserted { .. } => ChangeKind::Inserted,
            Self::Removed { .. } => ChangeKind::Removed,
            Self::Changed { .. } => ChangeKind::Changed,
        }
    }
}

#[derive(Debug)]
struct Entry<T> {
    event: RecordedEvent<T>,
    len: usize,
}

/// Shared log of the notifications a sequence has emitted.
///
/// Cloning a recorder creates a new handle to the **same** log.
#[derive(Debug)]
pub struct EventRecorder<T> {
    log: Rc<RefCell<Vec<Entry<T>>>>,
    ids: [ListenerId; 3],
}

impl<T> Clone for EventRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
            ids: self.ids,
        }
    }
}

impl<T: Clone + 'static> EventRecorder<T> {
    /// Subscribe to all three event kinds of `seq`.
    pub fn attach(seq: &mut ObservableVec<T>) -> Self {
        let log: Rc<RefCell<Vec<Entry<T>>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let inserted = seq.on_inserted(move |s, value, index| {
            sink.borrow_mut().push(Entry {
                event: RecordedEvent::Inserted {
                    value: value.clone(),
                    index,
                },
                len: s.len(),
            });
        });

        let sink = Rc::clone(&log);
        let removed = seq.on_removed(move |s, value, index| {
            sink.borrow_mut().push(Entry {
                event: RecordedEvent::Removed {
                    value: value.clone(),
                    index,
                },
                len: s.len(),
            });
        });

        let sink = Rc::clone(&log);
        let changed = seq.on_changed(move |s, new, old, index| {
            sink.borrow_mut().push(Entry {
                event: RecordedEvent::Changed {
                    new: new.clone(),
                    old: old.clone(),
                    index,
                },
                len: s.len(),
            });
        });

        Self {
            log,
            ids: [inserted, removed, changed],
        }
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent<T>> {
        self.log.borrow().iter().map(|e| e.event.clone()).collect()
    }

    /// Sequence length seen by the listener for each recorded event.
    #[must_use]
    pub fn observed_lengths(&self) -> Vec<usize> {
        self.log.borrow().iter().map(|e| e.len).collect()
    }

    /// Drain the log, returning the events recorded so far.
    pub fn take(&self) -> Vec<RecordedEvent<T>> {
        self.log.borrow_mut().drain(..).map(|e| e.event).collect()
    }
}

impl<T> EventRecorder<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Number of recorded events of `kind`.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|e| e.event.kind() == kind)
            .count()
    }

    /// Unsubscribe from `seq`. The log stays readable.
    pub fn detach(&self, seq: &mut ObservableVec<T>) {
        for id in self.ids {
            seq.remove_listener(id);
        }
    }
}
