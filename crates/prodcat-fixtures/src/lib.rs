// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use prodcat_app::{
    Catalog, CatalogSource, Category, CategoryId, Product, ProductId, Sex, User, UserId,
};

const USERS: [(i64, &str, &str); 4] = [
    (1, "Roma", "m"),
    (2, "Anna", "f"),
    (3, "Max", "m"),
    (4, "John", "m"),
];

const CATEGORIES: [(i64, &str, &str, i64); 5] = [
    (1, "Grocery", "🍞", 2),
    (2, "Drinks", "🍺", 1),
    (3, "Fruits", "🍏", 2),
    (4, "Electronics", "💻", 1),
    (5, "Clothes", "👚", 3),
];

const PRODUCTS: [(i64, &str, i64); 9] = [
    (1, "Milk", 2),
    (2, "Bread", 1),
    (3, "Eggs", 1),
    (4, "Jacket", 5),
    (5, "Sugar", 1),
    (6, "Beer", 2),
    (7, "Laptop", 4),
    (8, "Apples", 3),
    (9, "Bananas", 3),
];

/// The static catalog shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledFixtures;

impl CatalogSource for BundledFixtures {
    fn users(&self) -> Result<Vec<User>> {
        USERS
            .iter()
            .map(|(id, name, sex)| -> Result<User> {
                let sex = Sex::parse(sex)
                    .ok_or_else(|| anyhow!("user {id} has unknown sex tag {sex:?}"))?;
                Ok(User {
                    id: UserId::new(*id),
                    name: (*name).to_owned(),
                    sex,
                })
            })
            .collect()
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(CATEGORIES
            .iter()
            .map(|(id, title, icon, owner_id)| Category {
                id: CategoryId::new(*id),
                title: (*title).to_owned(),
                icon: (*icon).to_owned(),
                owner_id: UserId::new(*owner_id),
            })
            .collect())
    }

    fn products(&self) -> Result<Vec<Product>> {
        Ok(PRODUCTS
            .iter()
            .map(|(id, name, category_id)| Product {
                id: ProductId::new(*id),
                name: (*name).to_owned(),
                category_id: CategoryId::new(*category_id),
            })
            .collect())
    }
}

pub fn bundled_catalog() -> Result<Catalog> {
    Catalog::load(&BundledFixtures)
}

/// Assembles small catalogs for tests.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: i64, name: &str, sex: Sex) -> Self {
        self.users.push(User {
            id: UserId::new(id),
            name: name.to_owned(),
            sex,
        });
        self
    }

    pub fn category(mut self, id: i64, title: &str, icon: &str, owner_id: i64) -> Self {
        self.categories.push(Category {
            id: CategoryId::new(id),
            title: title.to_owned(),
            icon: icon.to_owned(),
            owner_id: UserId::new(owner_id),
        });
        self
    }

    pub fn product(mut self, id: i64, name: &str, category_id: i64) -> Self {
        self.products.push(Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            category_id: CategoryId::new(category_id),
        });
        self
    }

    pub fn build(self) -> Result<Catalog> {
        Catalog::build(self.users, self.categories, self.products)
    }
}
