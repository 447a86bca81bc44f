use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use leptos::{RwSignal, SignalUpdate};

use crate::error::ViewError;

/// Lifecycle of whatever a view fetches on mount.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    /// Idle counts as loading: a mounted view always has its first fetch pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Idle | LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            LoadState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Idle | LoadState::Loading => LoadPhase::Loading,
            LoadState::Ready(_) => LoadPhase::Ready,
            LoadState::Error(err) => LoadPhase::Failed(err.clone()),
        }
    }
}

/// Data-free summary of a [`LoadState`], cheap to compare in memos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(ViewError),
}

/// Handle identifying one load started by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Generation counter used to drop responses from superseded loads.
///
/// Tickets are drawn from one process-wide sequence, so a view rebuilt from
/// scratch never hands out a ticket an older instance already issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Epoch(u64);

impl Epoch {
    pub fn advance(&mut self) -> Ticket {
        self.0 = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        Ticket(self.0)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}

/// Owner of a view's state that async handlers write back into.
///
/// `apply` returns `None` once the owner is gone (the page was unmounted).
pub trait ViewCell<V> {
    fn apply<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R>;
}

impl<V: 'static> ViewCell<V> for RwSignal<V> {
    fn apply<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl<V> ViewCell<V> for Rc<RefCell<V>> {
    fn apply<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}
