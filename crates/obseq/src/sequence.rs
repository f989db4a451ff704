#![forbid(unsafe_code)]

//! Observable ordered sequence.
//!
//! # Design
//!
//! [`ObservableVec<T>`] owns a `Vec<T>` and three listener registries, one
//! per [`ChangeKind`]. Every mutating method first applies its change to the
//! vector, then calls each listener of the matching kind with a shared borrow
//! of the sequence, so listeners can re-query `len()` or `get()` and always
//! see the post-mutation state.
//!
//! Because listeners only ever receive `&ObservableVec<T>`, a listener cannot
//! mutate the sequence it is observing. Re-entrancy is ruled out at compile
//! time rather than at runtime.
//!
//! # Notifications
//!
//! | Operation | Kind | Payload |
//! |-----------|------|---------|
//! | `append(v)` | inserted | `(v, len - 1)` |
//! | `insert(i, v)`, `i < len` | changed | `(v, previous occupant of i, i)` |
//! | `insert(len, v)` | inserted | `(v, len - 1)` |
//! | `set(i, v)` | changed | `(v, old, i)` |
//! | `remove_at(i)` | removed | `(removed, Some(i))` |
//! | `remove(&v)`, found at `i` | removed | `(removed, Some(i))` |
//! | `remove(&v)`, not found | removed | `(v, None)` |
//! | `clear()` | none | |
//!
//! The interior-insert, remove-miss and clear rows follow the default
//! [`SequenceConfig`]; each can be switched explicitly.
//!
//! # Failure Modes
//!
//! - **Listener error**: delivery stops at the failing listener and the
//!   error is returned as [`SeqError::Listener`]. The mutation stays
//!   applied. For `remove_at` the removed value is dropped.
//! - **Listener panic**: unwinds through the mutating call with the
//!   mutation applied, same as an error.
//!
//! # Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `get()`, `len()` | O(1) |
//! | `append()`, `set()` | O(L) where L = listeners of that kind |
//! | `insert()`, `remove_at()` | O(n + L) |
//! | `remove()`, `index_of()` | O(n) + O(L) |

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::config::{ClearNotification, InsertNotification, RemoveMiss, SequenceConfig};
use crate::error::{ListenerError, SeqError};
use crate::event::{ChangeKind, ChangedFn, InsertedFn, ListenerId, RemovedFn};
use crate::registry::ListenerRegistry;

/// Process-unique identity of a sequence instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

impl SequenceId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq#{}", self.0)
    }
}

/// An ordered sequence that notifies listeners of every change.
///
/// Equality and hashing are by identity: two sequences with the same
/// contents are different values, and a sequence only equals itself.
/// Compare contents with `a.as_slice() == b.as_slice()`.
///
/// # Invariants
///
/// 1. Valid indices are exactly `0..len()`.
/// 2. Listeners run after the mutation, in registration order.
/// 3. Each mutating call fires at most one kind of event (except
///    `clear()` under [`ClearNotification::PerElement`], which fires one
///    removed event per element).
pub struct ObservableVec<T> {
    id: SequenceId,
    items: Vec<T>,
    config: SequenceConfig,
    inserted: ListenerRegistry<InsertedFn<T>>,
    removed: ListenerRegistry<RemovedFn<T>>,
    changed: ListenerRegistry<ChangedFn<T>>,
}

impl<T> ObservableVec<T> {
    /// Create an empty sequence with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Create an empty sequence with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(SequenceConfig::default().with_initial_capacity(capacity))
    }

    /// Create an empty sequence with the given configuration.
    #[must_use]
    pub fn with_config(config: SequenceConfig) -> Self {
        let items = Vec::with_capacity(config.initial_capacity);
        Self::from_parts(items, config)
    }

    /// Wrap existing elements. No notifications are emitted.
    #[must_use]
    pub fn from_vec_with_config(items: Vec<T>, config: SequenceConfig) -> Self {
        Self::from_parts(items, config)
    }

    fn from_parts(mut items: Vec<T>, config: SequenceConfig) -> Self {
        items.reserve(config.initial_capacity.saturating_sub(items.len()));
        Self {
            id: SequenceId::next(),
            items,
            config,
            inserted: ListenerRegistry::new(),
            removed: ListenerRegistry::new(),
            changed: ListenerRegistry::new(),
        }
    }

    /// Identity of this instance.
    #[must_use]
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, SeqError> {
        self.items.get(index).ok_or(SeqError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Current contents as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the current contents.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Add `value` at the end and fire `inserted(value, len - 1)`.
    pub fn append(&mut self, value: T) -> Result<(), SeqError> {
        self.items.push(value);
        let index = self.items.len() - 1;
        self.log_op("append", index);
        self.notify_inserted(&self.items[index], index)
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// `index == len()` behaves like [`append`](Self::append). An interior
    /// index fires `changed(value, previous occupant, index)` under the
    /// default [`InsertNotification::Changed`] policy, where the previous
    /// occupant is the element now at `index + 1`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        let len = self.items.len();
        if index > len {
            return Err(SeqError::IndexOutOfRange { index, len });
        }
        self.items.insert(index, value);
        self.log_op("insert", index);

        if index == len || self.config.insert_notification == InsertNotification::Inserted {
            self.notify_inserted(&self.items[index], index)
        } else {
            self.notify_changed(&self.items[index], &self.items[index + 1], index)
        }
    }

    /// Replace the element at `index` and fire `changed(value, old, index)`.
    ///
    /// Returns the replaced element. The length is unchanged.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(SeqError::IndexOutOfRange { index, len })?;
        let old = std::mem::replace(slot, value);
        self.log_op("set", index);
        self.notify_changed(&self.items[index], &old, index)?;
        Ok(old)
    }

    /// Remove the element at `index` and fire `removed(value, Some(index))`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, SeqError> {
        let len = self.items.len();
        if index >= len {
            return Err(SeqError::IndexOutOfRange { index, len });
        }
        let removed = self.items.remove(index);
        self.log_op("remove_at", index);
        self.notify_removed(&removed, Some(index))?;
        Ok(removed)
    }

    /// Remove every element.
    ///
    /// Silent under the default [`ClearNotification::Silent`] policy.
    pub fn clear(&mut self) -> Result<(), SeqError> {
        let count = self.items.len();
        match self.config.clear_notification {
            ClearNotification::Silent => {
                self.items.clear();
                self.log_clear(count);
                Ok(())
            }
            ClearNotification::PerElement => {
                let drained: Vec<T> = self.items.drain(..).collect();
                self.log_clear(count);
                for (index, item) in drained.iter().enumerate() {
                    self.notify_removed(item, Some(index))?;
                }
                Ok(())
            }
        }
    }

    /// Register an infallible inserted listener.
    pub fn on_inserted<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, usize) + 'static,
        T: 'static,
    {
        self.try_on_inserted(move |seq, value, index| {
            listener(seq, value, index);
            Ok(())
        })
    }

    /// Register a fallible inserted listener.
    pub fn try_on_inserted<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, usize) -> Result<(), ListenerError> + 'static,
        T: 'static,
    {
        let id = self.inserted.push(Box::new(listener));
        self.log_subscribe(ChangeKind::Inserted, id);
        id
    }

    /// Register an infallible removed listener. The index is `None` for a
    /// [`remove`](Self::remove) that found nothing.
    pub fn on_removed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, Option<usize>) + 'static,
        T: 'static,
    {
        self.try_on_removed(move |seq, value, index| {
            listener(seq, value, index);
            Ok(())
        })
    }

    /// Register a fallible removed listener.
    pub fn try_on_removed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, Option<usize>) -> Result<(), ListenerError> + 'static,
        T: 'static,
    {
        let id = self.removed.push(Box::new(listener));
        self.log_subscribe(ChangeKind::Removed, id);
        id
    }

    /// Register an infallible changed listener, called with
    /// `(sequence, new, old, index)`.
    pub fn on_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, &T, usize) + 'static,
        T: 'static,
    {
        self.try_on_changed(move |seq, new, old, index| {
            listener(seq, new, old, index);
            Ok(())
        })
    }

    /// Register a fallible changed listener.
    pub fn try_on_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Self, &T, &T, usize) -> Result<(), ListenerError> + 'static,
        T: 'static,
    {
        let id = self.changed.push(Box::new(listener));
        self.log_subscribe(ChangeKind::Changed, id);
        id
    }

    /// Unregister a listener of any kind. Returns `false` if `id` is not
    /// registered on this sequence.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed =
            self.inserted.remove(id) || self.removed.remove(id) || self.changed.remove(id);
        if removed {
            #[cfg(feature = "tracing")]
            debug!(seq = %self.id, listener = %id, "listener removed");
        }
        removed
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Inserted => self.inserted.len(),
            ChangeKind::Removed => self.removed.len(),
            ChangeKind::Changed => self.changed.len(),
        }
    }

    fn notify_inserted(&self, value: &T, index: usize) -> Result<(), SeqError> {
        for (position, listener) in self.inserted.iter().enumerate() {
            listener(self, value, index)
                .map_err(|source| self.listener_failed(ChangeKind::Inserted, position, source))?;
        }
        Ok(())
    }

    fn notify_removed(&self, value: &T, index: Option<usize>) -> Result<(), SeqError> {
        for (position, listener) in self.removed.iter().enumerate() {
            listener(self, value, index)
                .map_err(|source| self.listener_failed(ChangeKind::Removed, position, source))?;
        }
        Ok(())
    }

    fn notify_changed(&self, new: &T, old: &T, index: usize) -> Result<(), SeqError> {
        for (position, listener) in self.changed.iter().enumerate() {
            listener(self, new, old, index)
                .map_err(|source| self.listener_failed(ChangeKind::Changed, position, source))?;
        }
        Ok(())
    }

    fn listener_failed(
        &self,
        kind: ChangeKind,
        _position: usize,
        source: ListenerError,
    ) -> SeqError {
        #[cfg(feature = "tracing")]
        debug!(
            seq = %self.id,
            label = self.label(),
            kind = kind.as_str(),
            position = _position,
            error = %source,
            "listener failed; remaining listeners skipped"
        );
        SeqError::Listener { kind, source }
    }

    #[inline]
    fn log_op(&self, _op: &'static str, _index: usize) {
        #[cfg(feature = "tracing")]
        trace!(
            seq = %self.id,
            label = self.label(),
            op = _op,
            index = _index,
            len = self.items.len(),
            "sequence mutated"
        );
    }

    #[inline]
    fn log_clear(&self, _count: usize) {
        #[cfg(feature = "tracing")]
        trace!(
            seq = %self.id,
            label = self.label(),
            op = "clear",
            count = _count,
            len = self.items.len(),
            "sequence cleared"
        );
    }

    #[inline]
    fn log_subscribe(&self, _kind: ChangeKind, _id: ListenerId) {
        #[cfg(feature = "tracing")]
        debug!(
            seq = %self.id,
            label = self.label(),
            kind = _kind.as_str(),
            listener = %_id,
            "listener registered"
        );
    }

    #[cfg(feature = "tracing")]
    fn label(&self) -> &str {
        self.config.label.as_deref().unwrap_or("")
    }
}

impl<T: PartialEq> ObservableVec<T> {
    /// Whether any element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    /// Index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Remove the first element equal to `value`.
    ///
    /// On a hit fires `removed(element, Some(index))` and returns `true`.
    /// On a miss returns `false`; under the default [`RemoveMiss::Notify`]
    /// policy it still fires `removed(value, None)`.
    pub fn remove(&mut self, value: &T) -> Result<bool, SeqError> {
        match self.index_of(value) {
            Some(index) => {
                let removed = self.items.remove(index);
                self.log_op("remove", index);
                self.notify_removed(&removed, Some(index))?;
                Ok(true)
            }
            None => {
                if self.config.remove_miss == RemoveMiss::Notify {
                    self.notify_removed(value, None)?;
                }
                Ok(false)
            }
        }
    }
}

impl<T: Clone> ObservableVec<T> {
    /// Clone the contents into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), SeqError> {
        let available = dest.len().saturating_sub(offset);
        let needed = self.items.len();
        if offset > dest.len() || needed > available {
            return Err(SeqError::DestinationTooSmall { needed, available });
        }
        dest[offset..offset + needed].clone_from_slice(&self.items);
        Ok(())
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ObservableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_parts(items, SequenceConfig::default())
    }
}

impl<T> FromIterator<T> for ObservableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, T> IntoIterator for &'a ObservableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for ObservableVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`ObservableVec::get`] for a
    /// checked lookup.
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> PartialEq for ObservableVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ObservableVec<T> {}

impl<T> Hash for ObservableVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableVec")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("inserted_listeners", &self.inserted.len())
            .field("removed_listeners", &self.removed.len())
            .field("changed_listeners", &self.changed.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
