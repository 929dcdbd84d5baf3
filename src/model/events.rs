//! Model change notifications.
//!
//! Each model keeps an [`Observers`] list mapping an event kind to the
//! callbacks registered for it. Emitting calls them synchronously, in
//! registration order, on the caller's thread. There is no reentrancy guard:
//! a callback must not call back into the model that is emitting.

use std::collections::HashMap;

use crate::address::Axis;

/// Event discriminant used to register callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PageConfigChanged,
    PageChanged,
    RowChanged,
    AxisChanged,
    VolumeIndexChanged,
}

/// Events emitted by paged models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// Page size or page count changed
    PageConfigChanged {
        page: usize,
        page_count: usize,
        page_size: usize,
    },

    /// A different page is now resident (or the current one was reloaded)
    PageChanged { page: usize },

    /// The current row moved, or a row's cells were edited
    RowChanged { row: usize },

    /// A volume model switched slicing axis
    AxisChanged { axis: Axis },

    /// A volume model switched to another volume of the stack
    VolumeIndexChanged { index: usize },
}

impl ModelEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ModelEvent::PageConfigChanged { .. } => EventKind::PageConfigChanged,
            ModelEvent::PageChanged { .. } => EventKind::PageChanged,
            ModelEvent::RowChanged { .. } => EventKind::RowChanged,
            ModelEvent::AxisChanged { .. } => EventKind::AxisChanged,
            ModelEvent::VolumeIndexChanged { .. } => EventKind::VolumeIndexChanged,
        }
    }
}

/// Callback type for receiving model events.
pub type EventCallback = Box<dyn FnMut(&ModelEvent)>;

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered callbacks, grouped by event kind.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: HashMap<EventKind, Vec<(SubscriptionId, EventCallback)>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&ModelEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for callbacks in self.callbacks.values_mut() {
            if let Some(position) = callbacks.iter().position(|(cb_id, _)| *cb_id == id) {
                callbacks.remove(position);
                return true;
            }
        }
        false
    }

    /// Invoke every callback registered for the event's kind.
    pub fn emit(&mut self, event: &ModelEvent) {
        if let Some(callbacks) = self.callbacks.get_mut(&event.kind()) {
            for (_, callback) in callbacks.iter_mut() {
                callback(event);
            }
        }
    }

    /// Number of callbacks registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.callbacks.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&EventKind, usize> =
            self.callbacks.iter().map(|(k, v)| (k, v.len())).collect();
        f.debug_struct("Observers").field("callbacks", &counts).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
