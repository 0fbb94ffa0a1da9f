// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{SortColumn, SortDirection};

/// Filter and sort selections driving the visible rows. Empty strings mean
/// "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub selected_owner_name: String,
    pub selected_category_title: String,
    pub search_query: String,
    pub active_sort_column: Option<SortColumn>,
    pub sort_toggle_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    SetOwnerFilter(String),
    ClearOwnerFilter,
    SetCategoryFilter(String),
    ClearCategoryFilter,
    SetSearchQuery(String),
    ClearSearchQuery,
    SetSortColumn(SortColumn),
    ResetAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    OwnerFilterChanged(String),
    CategoryFilterChanged(String),
    SearchQueryChanged(String),
    SortChanged {
        column: SortColumn,
        direction: SortDirection,
    },
    Reset,
}

impl ViewState {
    /// Applies one user action. The returned events describe what changed;
    /// an empty list means the state is unchanged.
    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        match command {
            ViewCommand::SetOwnerFilter(name) => self.set_owner_filter(name),
            ViewCommand::ClearOwnerFilter => self.set_owner_filter(String::new()),
            ViewCommand::SetCategoryFilter(title) => self.set_category_filter(title),
            ViewCommand::ClearCategoryFilter => self.set_category_filter(String::new()),
            ViewCommand::SetSearchQuery(text) => self.set_search_query(text),
            ViewCommand::ClearSearchQuery => self.clear_search_query(),
            ViewCommand::SetSortColumn(column) => self.set_sort_column(column),
            ViewCommand::ResetAll => self.reset_all(),
        }
    }

    pub fn set_owner_filter(&mut self, name: impl Into<String>) -> Vec<ViewEvent> {
        let name = name.into();
        if self.selected_owner_name == name {
            return Vec::new();
        }
        self.selected_owner_name = name;
        vec![ViewEvent::OwnerFilterChanged(self.selected_owner_name.clone())]
    }

    /// Plain assignment: selecting the current category again keeps it
    /// selected.
    pub fn set_category_filter(&mut self, title: impl Into<String>) -> Vec<ViewEvent> {
        let title = title.into();
        if self.selected_category_title == title {
            return Vec::new();
        }
        self.selected_category_title = title;
        vec![ViewEvent::CategoryFilterChanged(
            self.selected_category_title.clone(),
        )]
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) -> Vec<ViewEvent> {
        let text = text.into();
        if self.search_query == text {
            return Vec::new();
        }
        self.search_query = text;
        vec![ViewEvent::SearchQueryChanged(self.search_query.clone())]
    }

    pub fn clear_search_query(&mut self) -> Vec<ViewEvent> {
        self.set_search_query(String::new())
    }

    /// A click on a new column restarts its counter, so the first click
    /// always sorts ascending.
    pub fn set_sort_column(&mut self, column: SortColumn) -> Vec<ViewEvent> {
        if self.active_sort_column != Some(column) {
            self.active_sort_column = Some(column);
            self.sort_toggle_count = 0;
        }
        self.sort_toggle_count = self.sort_toggle_count.saturating_add(1);
        vec![ViewEvent::SortChanged {
            column,
            direction: self.sort_direction(),
        }]
    }

    pub fn reset_all(&mut self) -> Vec<ViewEvent> {
        if *self == Self::default() {
            return Vec::new();
        }
        *self = Self::default();
        vec![ViewEvent::Reset]
    }

    pub fn sort_direction(&self) -> SortDirection {
        match self.active_sort_column {
            Some(_) => SortDirection::from_toggle_count(self.sort_toggle_count),
            None => SortDirection::Unsorted,
        }
    }

    /// Direction shown on a given column header; inactive columns are
    /// always unsorted.
    pub fn direction_for(&self, column: SortColumn) -> SortDirection {
        if self.active_sort_column == Some(column) {
            self.sort_direction()
        } else {
            SortDirection::Unsorted
        }
    }
}
