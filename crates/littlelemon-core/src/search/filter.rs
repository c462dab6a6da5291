use std::collections::HashSet;

use crate::models::MenuItem;
use crate::utils::contains_ignore_case;

/// Items visible for the given active categories and query text.
///
/// With no active categories and an empty query the whole menu is returned
/// in its original order. Otherwise an item must belong to one of the
/// active categories (when any are active) and its name must contain the
/// query, ignoring case (when the query is non-empty).
pub fn apply<'a>(
    menu: &'a [MenuItem],
    active_categories: &HashSet<String>,
    query: &str,
) -> Vec<&'a MenuItem> {
    if active_categories.is_empty() && query.is_empty() {
        return menu.iter().collect();
    }

    menu.iter()
        .filter(|item| active_categories.is_empty() || active_categories.contains(&item.category))
        .filter(|item| query.is_empty() || contains_ignore_case(&item.name, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            category: category.to_string(),
            image: String::new(),
        }
    }

    fn menu() -> Vec<MenuItem> {
        vec![
            item("Greek Salad", "starters"),
            item("Bruschetta", "starters"),
            item("Grilled Fish", "mains"),
            item("Pasta", "mains"),
            item("Lemon Dessert", "desserts"),
        ]
    }

    fn categories(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn names<'a>(items: &[&'a MenuItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_identity_without_filters() {
        let menu = menu();
        let visible = apply(&menu, &HashSet::new(), "");
        let owned: Vec<MenuItem> = visible.into_iter().cloned().collect();
        assert_eq!(owned, menu);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let menu = menu();
        let active = categories(&["mains", "desserts"]);
        let visible = apply(&menu, &active, "");

        assert!(visible.iter().all(|i| active.contains(&i.category)));
        let expected = menu.iter().filter(|i| active.contains(&i.category)).count();
        assert_eq!(visible.len(), expected);
        assert_eq!(names(&visible), vec!["Grilled Fish", "Pasta", "Lemon Dessert"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let menu = vec![item("Greek Salad", "Mains"), item("Lemon Dessert", "Desserts")];
        let visible = apply(&menu, &HashSet::new(), "greek");
        assert_eq!(names(&visible), vec!["Greek Salad"]);

        let visible = apply(&menu, &HashSet::new(), "DESSERT");
        assert_eq!(names(&visible), vec!["Lemon Dessert"]);
    }

    #[test]
    fn test_query_filter_idempotent() {
        let menu = menu();
        let once: Vec<MenuItem> = apply(&menu, &HashSet::new(), "s")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<MenuItem> = apply(&once, &HashSet::new(), "s")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
        assert!(once.iter().all(|i| contains_ignore_case(&i.name, "s")));
    }

    #[test]
    fn test_category_and_query_compose() {
        let menu = menu();
        let visible = apply(&menu, &categories(&["starters"]), "sa");
        assert_eq!(names(&visible), vec!["Greek Salad"]);

        let visible = apply(&menu, &categories(&["mains"]), "salad");
        assert!(visible.is_empty());
    }

    #[test]
    fn test_unknown_category_hides_everything() {
        let menu = menu();
        assert!(apply(&menu, &categories(&["drinks"]), "").is_empty());
    }
}
