//! Ordered listener registry.
//!
//! One [`ListenerRegistry`] exists per event kind. Entries keep their
//! registration order; removal closes the gap without reordering the rest.

use crate::event::ListenerId;

/// Ordered list of listeners of one callback type.
pub struct ListenerRegistry<F: ?Sized> {
    entries: Vec<(ListenerId, Box<F>)>,
}

impl<F: ?Sized> Default for ListenerRegistry<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: ?Sized> ListenerRegistry<F> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener and return its id.
    pub fn push(&mut self, callback: Box<F>) -> ListenerId {
        let id = ListenerId::next();
        self.entries.push((id, callback));
        id
    }

    /// Remove the listener with `id`. Returns `false` if it is not here.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether a listener with `id` is registered here.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, callback)| callback.as_ref())
    }
}

impl<F: ?Sized> std::fmt::Debug for ListenerRegistry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Tag = dyn Fn() -> char;

    fn tags(reg: &ListenerRegistry<Tag>) -> String {
        reg.iter().map(|f| f()).collect()
    }

    #[test]
    fn iterates_in_registration_order() {
        let mut reg: ListenerRegistry<Tag> = ListenerRegistry::new();
        reg.push(Box::new(|| 'A'));
        reg.push(Box::new(|| 'B'));
        reg.push(Box::new(|| 'C'));
        assert_eq!(tags(&reg), "ABC");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut reg: ListenerRegistry<Tag> = ListenerRegistry::new();
        reg.push(Box::new(|| 'A'));
        let b = reg.push(Box::new(|| 'B'));
        reg.push(Box::new(|| 'C'));

        assert!(reg.contains(b));
        assert!(reg.remove(b));
        assert!(!reg.contains(b));
        assert_eq!(tags(&reg), "AC");

        // Second removal is a no-op.
        assert!(!reg.remove(b));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn empty_registry() {
        let reg: ListenerRegistry<Tag> = ListenerRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.iter().count(), 0);
        assert!(format!("{reg:?}").contains("len: 0"));
    }
}
