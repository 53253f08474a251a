//! Category Views
//!
//! Derived groupings over the menu mirror, recomputed whenever the mirror
//! changes. Presentation indexes only; nothing here is persisted.

use crate::models::{MenuCategory, MenuItem};

/// Sentinel filter value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Distinct categories with item counts, `"All"` always first, then
/// categories in first-seen order.
pub fn category_counts(items: &[MenuItem]) -> Vec<(String, usize)> {
    let mut counts = vec![(ALL_CATEGORIES.to_string(), items.len())];
    counts.extend(
        group_by_category(items)
            .into_iter()
            .map(|group| (group.name, group.items.len())),
    );
    counts
}

/// Items visible under a filter selection; `"All"` passes everything.
pub fn filter_items(items: &[MenuItem], selected: &str) -> Vec<MenuItem> {
    if selected == ALL_CATEGORIES {
        items.to_vec()
    } else {
        items
            .iter()
            .filter(|item| item.category == selected)
            .cloned()
            .collect()
    }
}

/// Group items by category in first-seen order.
pub fn group_by_category(items: &[MenuItem]) -> Vec<MenuCategory> {
    let mut groups: Vec<MenuCategory> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|group| group.name == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(MenuCategory {
                name: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: &str, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            price: 1000.0,
            category: category.to_string(),
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_empty_mirror_yields_all_only() {
        let counts = category_counts(&[]);
        assert_eq!(counts, vec![("All".to_string(), 0)]);
    }

    #[test]
    fn test_counts_all_first_then_first_seen_order() {
        let items = vec![
            make_item("1", "Drinks"),
            make_item("2", "Main Course"),
            make_item("3", "Drinks"),
        ];

        let counts = category_counts(&items);
        assert_eq!(
            counts,
            vec![
                ("All".to_string(), 3),
                ("Drinks".to_string(), 2),
                ("Main Course".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_filter_narrows_to_category() {
        let items = vec![
            make_item("1", "Drinks"),
            make_item("2", "Main Course"),
            make_item("3", "Drinks"),
        ];

        let drinks = filter_items(&items, "Drinks");
        assert_eq!(drinks.len(), 2);
        assert!(drinks.iter().all(|item| item.category == "Drinks"));
    }

    #[test]
    fn test_filter_all_is_idempotent() {
        let items = vec![make_item("1", "Drinks"), make_item("2", "Sides")];

        let once = filter_items(&items, ALL_CATEGORIES);
        let twice = filter_items(&once, ALL_CATEGORIES);
        assert_eq!(once, twice);
        assert_eq!(once, items);
    }

    #[test]
    fn test_group_by_category_first_seen_order() {
        let items = vec![
            make_item("1", "Drinks"),
            make_item("2", "Main Course"),
            make_item("3", "Drinks"),
        ];

        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Drinks");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].name, "Main Course");
        assert_eq!(groups[1].items.len(), 1);
    }
}
