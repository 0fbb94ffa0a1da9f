// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{Catalog, EnrichedProduct, ViewCommand, ViewEvent, ViewState, compute_visible_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ViewState, &[EnrichedProduct])>;

/// Binds the view-state store to the pipeline: every command that changes
/// the state recomputes the visible rows and notifies listeners.
pub struct Session {
    catalog: Catalog,
    state: ViewState,
    visible: Vec<EnrichedProduct>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        let state = ViewState::default();
        let visible = compute_visible_rows(&catalog, &state);
        Self {
            catalog,
            state,
            visible,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn visible_rows(&self) -> &[EnrichedProduct] {
        &self.visible
    }

    pub fn apply(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        let events = self.state.dispatch(command);
        if events.is_empty() {
            return events;
        }

        self.visible = compute_visible_rows(&self.catalog, &self.state);
        debug!(
            ?events,
            visible = self.visible.len(),
            total = self.catalog.len(),
            "view state changed"
        );
        for (_, listener) in &mut self.listeners {
            listener(&self.state, &self.visible);
        }
        events
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ViewState, &[EnrichedProduct]) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
