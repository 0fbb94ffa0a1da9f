// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use prodcat_app::{EnrichedProduct, Session, Sex, SortColumn, SortDirection};
use serde::{Serialize, Serializer};

pub const SCREEN_TITLE: &str = "Product Categories";
pub const NO_MATCHING_MESSAGE: &str = "No products matching selected criteria";
pub const ALL_LABEL: &str = "All";
pub const RESET_LABEL: &str = "Reset all filters";

/// Fixed identifiers for every element external checks need to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    FilterAllUsers,
    FilterUser,
    SearchField,
    ClearButton,
    AllCategories,
    Category,
    ResetAllButton,
    SortIcon,
    ProductTable,
    NoMatchingMessage,
    Product,
    ProductId,
    ProductName,
    ProductCategory,
    ProductUser,
}

impl Hook {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FilterAllUsers => "FilterAllUsers",
            Self::FilterUser => "FilterUser",
            Self::SearchField => "SearchField",
            Self::ClearButton => "ClearButton",
            Self::AllCategories => "AllCategories",
            Self::Category => "Category",
            Self::ResetAllButton => "ResetAllButton",
            Self::SortIcon => "SortIcon",
            Self::ProductTable => "ProductTable",
            Self::NoMatchingMessage => "NoMatchingMessage",
            Self::Product => "Product",
            Self::ProductId => "ProductId",
            Self::ProductName => "ProductName",
            Self::ProductCategory => "ProductCategory",
            Self::ProductUser => "ProductUser",
        }
    }
}

impl Serialize for Hook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    pub hook: Hook,
    pub label: String,
    /// Filter value applied on activation; empty clears the filter.
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchControl {
    pub hook: Hook,
    pub value: String,
    pub clear: Option<Hook>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortHeader {
    pub column: SortColumn,
    pub label: &'static str,
    pub hook: Hook,
    pub direction: SortDirection,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserTone {
    Danger,
    Link,
}

impl UserTone {
    pub const fn for_sex(sex: Sex) -> Self {
        match sex {
            Sex::Female => Self::Danger,
            Sex::Male => Self::Link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellModel {
    pub hook: Hook,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowModel {
    pub hook: Hook,
    pub cells: Vec<CellModel>,
    pub user_tone: UserTone,
}

impl RowModel {
    fn from_product(row: &EnrichedProduct) -> Self {
        Self {
            hook: Hook::Product,
            cells: vec![
                CellModel {
                    hook: Hook::ProductId,
                    text: row.id().to_string(),
                },
                CellModel {
                    hook: Hook::ProductName,
                    text: row.name().to_owned(),
                },
                CellModel {
                    hook: Hook::ProductCategory,
                    text: row.category_label(),
                },
                CellModel {
                    hook: Hook::ProductUser,
                    text: row.user.name.clone(),
                },
            ],
            user_tone: UserTone::for_sex(row.user.sex),
        }
    }

    pub fn cell(&self, hook: Hook) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.hook == hook)
            .map(|cell| cell.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Body {
    Table {
        hook: Hook,
        headers: Vec<SortHeader>,
        rows: Vec<RowModel>,
    },
    Empty {
        hook: Hook,
        message: &'static str,
    },
}

/// Everything the renderer draws, tagged with stable hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenModel {
    pub title: &'static str,
    pub owners: Vec<FilterControl>,
    pub search: SearchControl,
    pub categories: Vec<FilterControl>,
    pub reset: FilterControl,
    pub body: Body,
}

impl ScreenModel {
    pub fn build(session: &Session) -> Self {
        let state = session.state();
        let catalog = session.catalog();

        let mut owners = vec![FilterControl {
            hook: Hook::FilterAllUsers,
            label: ALL_LABEL.to_owned(),
            value: String::new(),
            active: state.selected_owner_name.is_empty(),
        }];
        owners.extend(catalog.users().iter().map(|user| FilterControl {
            hook: Hook::FilterUser,
            label: user.name.clone(),
            value: user.name.clone(),
            active: state.selected_owner_name == user.name,
        }));

        let mut categories = vec![FilterControl {
            hook: Hook::AllCategories,
            label: ALL_LABEL.to_owned(),
            value: String::new(),
            active: state.selected_category_title.is_empty(),
        }];
        categories.extend(catalog.categories().iter().map(|category| FilterControl {
            hook: Hook::Category,
            label: category.title.clone(),
            value: category.title.clone(),
            active: state.selected_category_title == category.title,
        }));

        let body = if session.visible_rows().is_empty() {
            Body::Empty {
                hook: Hook::NoMatchingMessage,
                message: NO_MATCHING_MESSAGE,
            }
        } else {
            Body::Table {
                hook: Hook::ProductTable,
                headers: SortColumn::ALL
                    .iter()
                    .map(|column| {
                        let direction = state.direction_for(*column);
                        SortHeader {
                            column: *column,
                            label: column.label(),
                            hook: Hook::SortIcon,
                            direction,
                            icon: direction.icon(),
                        }
                    })
                    .collect(),
                rows: session
                    .visible_rows()
                    .iter()
                    .map(RowModel::from_product)
                    .collect(),
            }
        };

        Self {
            title: SCREEN_TITLE,
            owners,
            search: SearchControl {
                hook: Hook::SearchField,
                value: state.search_query.clone(),
                clear: (!state.search_query.is_empty()).then_some(Hook::ClearButton),
            },
            categories,
            reset: FilterControl {
                hook: Hook::ResetAllButton,
                label: RESET_LABEL.to_owned(),
                value: String::new(),
                active: false,
            },
            body,
        }
    }

    pub fn rows(&self) -> &[RowModel] {
        match &self.body {
            Body::Table { rows, .. } => rows,
            Body::Empty { .. } => &[],
        }
    }
}
