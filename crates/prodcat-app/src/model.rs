// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "f" => Some(Self::Female),
            "m" => Some(Self::Male),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub icon: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
}

/// A product joined with its category and the category's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    pub product: Product,
    pub category: Category,
    pub user: User,
}

impl EnrichedProduct {
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    pub fn category_label(&self) -> String {
        format!("{} - {}", self.category.icon, self.category.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    Id,
    Product,
    Category,
    User,
}

impl SortColumn {
    pub const ALL: [Self; 4] = [Self::Id, Self::Product, Self::Category, Self::User];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Product => "Product",
            Self::Category => "Category",
            Self::User => "User",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "product" | "name" => Some(Self::Product),
            "category" => Some(Self::Category),
            "user" | "owner" => Some(Self::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Unsorted,
    Asc,
    Desc,
}

impl SortDirection {
    /// Zero clicks leave the column unsorted; after that odd counts sort
    /// ascending and even counts descending.
    pub const fn from_toggle_count(count: u64) -> Self {
        if count == 0 {
            Self::Unsorted
        } else if count % 2 == 1 {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Unsorted => "fa-sort",
            Self::Asc => "fa-sort-up",
            Self::Desc => "fa-sort-down",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "unsorted",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
