//! Sequence configuration.
//!
//! Every policy defaults to the compatibility behavior: interior inserts are
//! reported as changes, a `remove` miss is still announced, and `clear` is
//! silent. The alternatives exist for callers that want the other reading of
//! each case, chosen explicitly.

/// How `insert` at an interior index is announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertNotification {
    /// `changed(value, previous occupant of index, index)`.
    #[default]
    Changed,
    /// `inserted(value, index)`.
    Inserted,
}

/// What `remove` announces when no element matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveMiss {
    /// `removed(value, None)`.
    #[default]
    Notify,
    /// Nothing.
    Silent,
}

/// What `clear` announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearNotification {
    /// Nothing.
    #[default]
    Silent,
    /// `removed(item, Some(original index))` per element, ascending, after
    /// storage has been emptied.
    PerElement,
}

/// Configuration for an [`ObservableVec`](crate::ObservableVec).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Storage to reserve up front.
    pub initial_capacity: usize,
    /// Announcement for interior `insert`.
    pub insert_notification: InsertNotification,
    /// Announcement for a `remove` miss.
    pub remove_miss: RemoveMiss,
    /// Announcement for `clear`.
    pub clear_notification: ClearNotification,
    /// Name attached to log events.
    pub label: Option<String>,
}

impl SequenceConfig {
    /// Create a config with compatibility defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_insert_notification(mut self, policy: InsertNotification) -> Self {
        self.insert_notification = policy;
        self
    }

    #[must_use]
    pub fn with_remove_miss(mut self, policy: RemoveMiss) -> Self {
        self.remove_miss = policy;
        self
    }

    #[must_use]
    pub fn with_clear_notification(mut self, policy: ClearNotification) -> Self {
        self.clear_notification = policy;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Insert-style notifications everywhere, no miss events, per-element
    /// clear events.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
            .with_insert_notification(InsertNotification::Inserted)
            .with_remove_miss(RemoveMiss::Silent)
            .with_clear_notification(ClearNotification::PerElement)
    }
}
