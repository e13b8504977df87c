//! Minimal subscriber list used to broadcast bounds and mode changes.

use std::fmt;

/// Handle returned by a subscription, used to unsubscribe later.
pub type SubscriptionId = u64;

/// Callback invoked with each published value.
pub type Listener<T> = Box<dyn FnMut(T)>;

/// Ordered list of listeners. Notification order is subscription order.
pub struct Listeners<T> {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: Copy> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Register a listener and return its handle.
    pub fn add(&mut self, listener: Listener<T>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if the handle is unknown.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, value: T) {
        for (_, listener) in self.entries.iter_mut() {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Copy> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
