// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::{Catalog, EnrichedProduct, SortColumn, SortDirection, ViewState, collate};

/// Sorts then filters the catalog for the given view state. Catalog order is
/// kept when no column is active.
pub fn compute_visible_rows(catalog: &Catalog, state: &ViewState) -> Vec<EnrichedProduct> {
    let mut rows = catalog.rows().to_vec();

    if let Some(column) = state.active_sort_column {
        match state.sort_direction() {
            SortDirection::Unsorted => {}
            SortDirection::Asc => rows.sort_by(|a, b| compare_rows(a, b, column)),
            SortDirection::Desc => rows.sort_by(|a, b| compare_rows(b, a, column)),
        }
    }

    let query = normalized_query(&state.search_query);
    rows.retain(|row| row_matches(row, state, query.as_deref()));
    rows
}

pub fn compare_rows(
    left: &EnrichedProduct,
    right: &EnrichedProduct,
    column: SortColumn,
) -> Ordering {
    match column {
        SortColumn::Id => left.product.id.get().cmp(&right.product.id.get()),
        SortColumn::Product => collate(&left.product.name, &right.product.name),
        SortColumn::Category => collate(&left.category.title, &right.category.title),
        SortColumn::User => collate(&left.user.name, &right.user.name),
    }
}

/// Owner, category and name-search predicates, all of which must hold.
pub fn matches_filters(row: &EnrichedProduct, state: &ViewState) -> bool {
    row_matches(row, state, normalized_query(&state.search_query).as_deref())
}

fn row_matches(row: &EnrichedProduct, state: &ViewState, query: Option<&str>) -> bool {
    let owner_ok =
        state.selected_owner_name.is_empty() || row.user.name == state.selected_owner_name;
    let category_ok = state.selected_category_title.is_empty()
        || row.category.title == state.selected_category_title;
    let query_ok = match query {
        None => true,
        Some(needle) => row.product.name.to_lowercase().contains(needle),
    };
    owner_ok && category_ok && query_ok
}

fn normalized_query(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{compare_rows, compute_visible_rows, matches_filters};
    use crate::{
        Catalog, Category, CategoryId, Product, ProductId, Sex, SortColumn, User, UserId,
        ViewState,
    };
    use anyhow::Result;
    use std::cmp::Ordering;

    fn catalog() -> Result<Catalog> {
        Catalog::build(
            vec![
                User {
                    id: UserId::new(1),
                    name: "Max".to_owned(),
                    sex: Sex::Male,
                },
                User {
                    id: UserId::new(2),
                    name: "Anna".to_owned(),
                    sex: Sex::Female,
                },
            ],
            vec![
                Category {
                    id: CategoryId::new(1),
                    title: "Fruits".to_owned(),
                    icon: "🍏".to_owned(),
                    owner_id: UserId::new(1),
                },
                Category {
                    id: CategoryId::new(2),
                    title: "Drinks".to_owned(),
                    icon: "🍺".to_owned(),
                    owner_id: UserId::new(2),
                },
            ],
            vec![
                Product {
                    id: ProductId::new(3),
                    name: "Apple".to_owned(),
                    category_id: CategoryId::new(1),
                },
                Product {
                    id: ProductId::new(1),
                    name: "Beer".to_owned(),
                    category_id: CategoryId::new(2),
                },
                Product {
                    id: ProductId::new(2),
                    name: "apple juice".to_owned(),
                    category_id: CategoryId::new(2),
                },
            ],
        )
    }

    fn ids(rows: &[crate::EnrichedProduct]) -> Vec<i64> {
        rows.iter().map(|row| row.id().get()).collect()
    }

    #[test]
    fn default_state_returns_catalog_order() -> Result<()> {
        let catalog = catalog()?;
        let rows = compute_visible_rows(&catalog, &ViewState::default());
        assert_eq!(ids(&rows), vec![3, 1, 2]);
        Ok(())
    }

    #[test]
    fn zero_toggle_count_keeps_catalog_order() -> Result<()> {
        let catalog = catalog()?;
        let state = ViewState {
            active_sort_column: Some(SortColumn::Id),
            sort_toggle_count: 0,
            ..ViewState::default()
        };
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![3, 1, 2]);
        Ok(())
    }

    #[test]
    fn id_sort_is_numeric_in_both_directions() -> Result<()> {
        let catalog = catalog()?;
        let mut state = ViewState::default();
        state.set_sort_column(SortColumn::Id);
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![1, 2, 3]);

        state.set_sort_column(SortColumn::Id);
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![3, 2, 1]);
        Ok(())
    }

    #[test]
    fn product_sort_uses_collation() -> Result<()> {
        let catalog = catalog()?;
        let mut state = ViewState::default();
        state.set_sort_column(SortColumn::Product);
        let names = compute_visible_rows(&catalog, &state)
            .iter()
            .map(|row| row.name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Apple", "apple juice", "Beer"]);
        Ok(())
    }

    #[test]
    fn equal_keys_keep_catalog_order_when_descending() -> Result<()> {
        let catalog = catalog()?;
        let mut state = ViewState::default();
        state.set_sort_column(SortColumn::User);
        state.set_sort_column(SortColumn::User);
        // Max owns 3; Anna owns 1 and 2 in that catalog order.
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![3, 1, 2]);

        state.set_sort_column(SortColumn::User);
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn search_is_case_and_trim_insensitive() -> Result<()> {
        let catalog = catalog()?;
        let state = ViewState {
            search_query: "  APPLE ".to_owned(),
            ..ViewState::default()
        };
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![3, 2]);
        Ok(())
    }

    #[test]
    fn whitespace_only_query_matches_everything() -> Result<()> {
        let catalog = catalog()?;
        let state = ViewState {
            search_query: "   ".to_owned(),
            ..ViewState::default()
        };
        assert_eq!(compute_visible_rows(&catalog, &state).len(), 3);
        Ok(())
    }

    #[test]
    fn filters_are_conjunctive() -> Result<()> {
        let catalog = catalog()?;
        let state = ViewState {
            selected_owner_name: "Anna".to_owned(),
            search_query: "apple".to_owned(),
            ..ViewState::default()
        };
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![2]);

        let row = &catalog.rows()[0];
        assert!(!matches_filters(row, &state));
        Ok(())
    }

    #[test]
    fn owner_and_category_match_exactly() -> Result<()> {
        let catalog = catalog()?;
        let state = ViewState {
            selected_owner_name: "max".to_owned(),
            ..ViewState::default()
        };
        assert!(compute_visible_rows(&catalog, &state).is_empty());

        let state = ViewState {
            selected_category_title: "Drinks".to_owned(),
            ..ViewState::default()
        };
        assert_eq!(ids(&compute_visible_rows(&catalog, &state)), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn compare_rows_reads_the_mapped_field() -> Result<()> {
        let catalog = catalog()?;
        let rows = catalog.rows();
        assert_eq!(compare_rows(&rows[0], &rows[1], SortColumn::Id), Ordering::Greater);
        assert_eq!(
            compare_rows(&rows[0], &rows[1], SortColumn::Category),
            Ordering::Greater
        );
        assert_eq!(compare_rows(&rows[0], &rows[1], SortColumn::User), Ordering::Greater);
        assert_eq!(compare_rows(&rows[1], &rows[2], SortColumn::User), Ordering::Equal);
        Ok(())
    }
}
