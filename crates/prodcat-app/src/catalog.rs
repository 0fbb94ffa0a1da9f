// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use std::collections::HashMap;

use crate::{Category, CategoryId, EnrichedProduct, Product, User, UserId};

/// Read-only provider of the raw record collections.
pub trait CatalogSource {
    fn users(&self) -> Result<Vec<User>>;
    fn categories(&self) -> Result<Vec<Category>>;
    fn products(&self) -> Result<Vec<Product>>;
}

/// The joined, immutable product listing for a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    users: Vec<User>,
    categories: Vec<Category>,
    rows: Vec<EnrichedProduct>,
}

impl Catalog {
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        let users = source.users().context("load users")?;
        let categories = source.categories().context("load categories")?;
        let products = source.products().context("load products")?;
        Self::build(users, categories, products)
    }

    pub fn build(
        users: Vec<User>,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self> {
        let mut users_by_id: HashMap<UserId, &User> = HashMap::with_capacity(users.len());
        for user in &users {
            if users_by_id.insert(user.id, user).is_some() {
                bail!("duplicate user id {} in catalog fixtures", user.id);
            }
        }

        let mut categories_by_id: HashMap<CategoryId, &Category> =
            HashMap::with_capacity(categories.len());
        for category in &categories {
            if !users_by_id.contains_key(&category.owner_id) {
                bail!(
                    "category {} ({:?}) references missing owner {}; fix the user fixtures",
                    category.id,
                    category.title,
                    category.owner_id
                );
            }
            if categories_by_id.insert(category.id, category).is_some() {
                bail!("duplicate category id {} in catalog fixtures", category.id);
            }
        }

        let mut rows = Vec::with_capacity(products.len());
        for product in products {
            let Some(category) = categories_by_id.get(&product.category_id) else {
                bail!(
                    "product {} ({:?}) references missing category {}; fix the category fixtures",
                    product.id,
                    product.name,
                    product.category_id
                );
            };
            let Some(user) = users_by_id.get(&category.owner_id) else {
                bail!("category {} lost its owner {}", category.id, category.owner_id);
            };
            rows.push(EnrichedProduct {
                category: (*category).clone(),
                user: (*user).clone(),
                product,
            });
        }

        Ok(Self {
            users,
            categories,
            rows,
        })
    }

    pub fn rows(&self) -> &[EnrichedProduct] {
        &self.rows
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
