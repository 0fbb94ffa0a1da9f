// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use prodcat_app::{
    EnrichedProduct, Session, Sex, SortColumn, SortDirection, ViewCommand, ViewState,
    compute_visible_rows,
};
use prodcat_fixtures::{CatalogBuilder, bundled_catalog};

fn names(rows: &[EnrichedProduct]) -> Vec<&str> {
    rows.iter().map(EnrichedProduct::name).collect()
}

#[test]
fn unfiltered_unsorted_state_returns_full_catalog() -> Result<()> {
    let catalog = bundled_catalog()?;
    let rows = compute_visible_rows(&catalog, &ViewState::default());
    assert_eq!(rows.as_slice(), catalog.rows());
    Ok(())
}

#[test]
fn owner_filter_keeps_only_that_owner_for_every_user() -> Result<()> {
    let catalog = bundled_catalog()?;
    for user in catalog.users() {
        let state = ViewState {
            selected_owner_name: user.name.clone(),
            ..ViewState::default()
        };
        let rows = compute_visible_rows(&catalog, &state);
        assert!(rows.iter().all(|row| row.user.name == user.name));

        let expected = catalog
            .rows()
            .iter()
            .filter(|row| row.user.name == user.name)
            .count();
        assert_eq!(rows.len(), expected, "owner {}", user.name);
    }
    Ok(())
}

#[test]
fn padded_query_matches_capitalised_name() -> Result<()> {
    let catalog = CatalogBuilder::new()
        .user(1, "Max", Sex::Male)
        .category(1, "Electronics", "💻", 1)
        .product(1, "Phone", 1)
        .product(2, "Laptop", 1)
        .build()?;
    let state = ViewState {
        search_query: " phone ".to_owned(),
        ..ViewState::default()
    };
    assert_eq!(names(&compute_visible_rows(&catalog, &state)), vec!["Phone"]);
    Ok(())
}

#[test]
fn sort_clicks_cycle_and_restart_on_new_column() -> Result<()> {
    let mut session = Session::new(bundled_catalog()?);
    let mut directions = Vec::new();
    for _ in 0..3 {
        session.apply(ViewCommand::SetSortColumn(SortColumn::Product));
        directions.push(session.state().sort_direction());
    }
    assert_eq!(
        directions,
        vec![SortDirection::Asc, SortDirection::Desc, SortDirection::Asc]
    );

    session.apply(ViewCommand::SetSortColumn(SortColumn::Category));
    assert_eq!(session.state().sort_direction(), SortDirection::Asc);
    assert_eq!(session.visible_rows()[0].category.title, "Clothes");
    Ok(())
}

#[test]
fn reset_all_restores_initial_rows_from_any_state() -> Result<()> {
    let mut session = Session::new(bundled_catalog()?);
    let initial = session.visible_rows().to_vec();

    session.apply(ViewCommand::SetOwnerFilter("Anna".to_owned()));
    session.apply(ViewCommand::SetCategoryFilter("Fruits".to_owned()));
    session.apply(ViewCommand::SetSearchQuery("ban".to_owned()));
    session.apply(ViewCommand::SetSortColumn(SortColumn::Id));
    session.apply(ViewCommand::SetSortColumn(SortColumn::Id));
    assert_ne!(session.visible_rows(), initial.as_slice());

    session.apply(ViewCommand::ResetAll);
    assert_eq!(session.state(), &ViewState::default());
    assert_eq!(session.visible_rows(), initial.as_slice());
    Ok(())
}

#[test]
fn all_three_predicates_must_hold() -> Result<()> {
    let catalog = CatalogBuilder::new()
        .user(1, "Alice", Sex::Female)
        .user(2, "Bob", Sex::Male)
        .category(1, "Grocery", "🍞", 1)
        .category(2, "Fruits", "🍏", 1)
        .category(3, "Grocery Annex", "🛒", 2)
        .product(1, "Apple sauce", 1)
        .product(2, "Apple", 2)
        .product(3, "Bread", 1)
        .product(4, "Apple pie", 3)
        .build()?;
    let state = ViewState {
        selected_owner_name: "Alice".to_owned(),
        selected_category_title: "Grocery".to_owned(),
        search_query: "app".to_owned(),
        ..ViewState::default()
    };
    // Apple misses the category, Bread misses the query, Apple pie misses the owner.
    assert_eq!(
        names(&compute_visible_rows(&catalog, &state)),
        vec!["Apple sauce"]
    );
    Ok(())
}

#[test]
fn selecting_max_returns_only_the_apple_row() -> Result<()> {
    let catalog = CatalogBuilder::new()
        .user(1, "Max", Sex::Male)
        .user(2, "Anna", Sex::Female)
        .user(3, "Roma", Sex::Male)
        .category(1, "Fruits", "🍏", 1)
        .category(2, "Drinks", "🍺", 2)
        .category(3, "Grocery", "🍞", 3)
        .product(1, "Apple", 1)
        .product(2, "Milk", 2)
        .product(3, "Bread", 3)
        .build()?;
    let mut session = Session::new(catalog);
    session.apply(ViewCommand::SetOwnerFilter("Max".to_owned()));
    assert_eq!(names(session.visible_rows()), vec!["Apple"]);
    Ok(())
}

#[test]
fn unknown_owner_yields_no_rows_without_error() -> Result<()> {
    let mut session = Session::new(bundled_catalog()?);
    session.apply(ViewCommand::SetOwnerFilter("NoSuchUser".to_owned()));
    assert!(session.visible_rows().is_empty());
    Ok(())
}

#[test]
fn sort_applies_before_filter() -> Result<()> {
    let mut session = Session::new(bundled_catalog()?);
    session.apply(ViewCommand::SetCategoryFilter("Grocery".to_owned()));
    session.apply(ViewCommand::SetSortColumn(SortColumn::Product));
    session.apply(ViewCommand::SetSortColumn(SortColumn::Product));
    assert_eq!(names(session.visible_rows()), vec!["Sugar", "Eggs", "Bread"]);
    Ok(())
}
