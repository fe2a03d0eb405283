//! Bookkeeping for every event subscription the widget holds.
//!
//! Listeners live in one of three categories with different lifetimes.
//! Releasing a category retires all of its listeners at once; a retired
//! listener is gone from the table and can never be returned by
//! [`ListenerRegistry::active`] again.

use std::fmt;

use crate::dom::event::EventType;
use crate::dom::target::EventTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerCategory {
    /// Document and container listeners, alive while mounted.
    Component,
    /// Row listeners, rebuilt on every render.
    Item,
    /// Commit listeners of the single active edit session.
    EditSession,
}

impl ListenerCategory {
    pub const ALL: [ListenerCategory; 3] = [Self::Component, Self::Item, Self::EditSession];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

/// What the widget does when a listener fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Defocus,
    RestoreFocus,
    ClearSelection,
    AddProperty,
    SelectRow,
    KeySelect,
    StartEdit,
    DoubleTapEdit,
    MoveUp,
    MoveDown,
    Remove,
    CommitEdit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub target: EventTarget,
    pub event_type: EventType,
    pub handler: Handler,
    pub phase: Phase,
    pub category: ListenerCategory,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: Handler,
        category: ListenerCategory,
    ) -> Result<ListenerId, ListenerError> {
        self.attach_in_phase(target, event_type, handler, Phase::Bubble, category)
    }

    pub fn attach_capture(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: Handler,
        category: ListenerCategory,
    ) -> Result<ListenerId, ListenerError> {
        self.attach_in_phase(target, event_type, handler, Phase::Capture, category)
    }

    fn attach_in_phase(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: Handler,
        phase: Phase,
        category: ListenerCategory,
    ) -> Result<ListenerId, ListenerError> {
        // One handler per (target, type, category), whatever the phase.
        let taken = self.listeners.iter().any(|l| {
            l.target == target && l.event_type == event_type && l.category == category
        });
        if taken {
            return Err(ListenerError {
                target,
                event_type,
                category,
            });
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            target,
            event_type,
            handler,
            phase,
            category,
        });
        Ok(id)
    }

    /// Retires every listener in `category`. Safe on an empty category.
    pub fn release_category(&mut self, category: ListenerCategory) -> usize {
        self.release_matching(category, |_| true)
    }

    pub fn release_matching(
        &mut self,
        category: ListenerCategory,
        mut predicate: impl FnMut(&EventTarget) -> bool,
    ) -> usize {
        let before = self.listeners.len();
        self.listeners
            .retain(|l| l.category != category || !predicate(&l.target));
        let released = before - self.listeners.len();
        if released > 0 {
            log::trace!("released {released} {category:?} listener(s)");
        }
        released
    }

    pub fn release_all(&mut self) -> usize {
        ListenerCategory::ALL
            .into_iter()
            .map(|category| self.release_category(category))
            .sum()
    }

    /// Listeners for `target`/`event_type` in `phase`, in attach order.
    pub fn active(
        &self,
        target: &EventTarget,
        event_type: EventType,
        phase: Phase,
    ) -> Vec<(ListenerId, Handler)> {
        self.listeners
            .iter()
            .filter(|l| &l.target == target && l.event_type == event_type && l.phase == phase)
            .map(|l| (l.id, l.handler))
            .collect()
    }

    pub fn is_active(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    pub fn count(&self, category: ListenerCategory) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.category == category)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }
}

/// A second listener for the same target, event type and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError {
    pub target: EventTarget,
    pub event_type: EventType,
    pub category: ListenerCategory,
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} already has a {:?} '{}' listener",
            self.target, self.category, self.event_type
        )
    }
}

impl std::error::Error for ListenerError {}
