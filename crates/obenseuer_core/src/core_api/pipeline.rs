use std::cmp::Ordering;
use std::collections::BTreeMap;

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;
use tracing::{trace, warn};

use super::catalog::Catalog;
use super::types::{CategoryFilter, FavoriteIds, Item, SortKey};
use super::view::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: CategoryFilter,
    pub count: usize,
}

/// What a viewer displays for one catalog + view state combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView<'a> {
    pub items: Vec<&'a Item>,
    /// `All` first, then every category in ascending order.
    pub categories: Vec<CategoryCount>,
}

pub fn derive_view<'a>(catalog: &'a Catalog, state: &ViewState) -> DerivedView<'a> {
    derive_view_with(
        catalog,
        &state.search_term,
        &state.selected_category,
        state.sort_key,
    )
}

pub fn derive_view_with<'a>(
    catalog: &'a Catalog,
    search_term: &str,
    category: &CategoryFilter,
    sort_key: SortKey,
) -> DerivedView<'a> {
    let needle = search_term.to_lowercase();
    let mut items: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|item| matches_search(item, &needle) && category.matches(item))
        .collect();

    // sort_by is stable, so ties keep catalog order.
    match sort_key {
        SortKey::Id => items.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::Title => items.sort_by(|a, b| compare_titles(a.title_str(), b.title_str())),
        SortKey::CatalogOrder => {}
    }

    trace!(
        visible = items.len(),
        total = catalog.len(),
        %category,
        %sort_key,
        "derived item view"
    );

    DerivedView {
        items,
        categories: category_counts(catalog),
    }
}

fn matches_search(item: &Item, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(needle))
}

/// `All` with the catalog size, then each distinct category with the number of
/// items listing it. An item naming a category twice is counted once.
pub fn category_counts(catalog: &Catalog) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in catalog.items() {
        for (index, category) in item.categories.iter().enumerate() {
            if item.categories[..index].contains(category) {
                continue;
            }
            *counts.entry(category.as_str()).or_default() += 1;
        }
    }

    let mut out = Vec::with_capacity(counts.len() + 1);
    out.push(CategoryCount {
        category: CategoryFilter::All,
        count: catalog.len(),
    });
    out.extend(counts.into_iter().map(|(name, count)| CategoryCount {
        category: CategoryFilter::Named(name.to_string()),
        count,
    }));
    out
}

/// Catalog-ordered items whose id is a favorite. Ignores search and filters.
pub fn favorite_items<'a>(catalog: &'a Catalog, favorites: &FavoriteIds) -> Vec<&'a Item> {
    catalog
        .items()
        .iter()
        .filter(|item| favorites.contains(item.id))
        .collect()
}

thread_local! {
    static TITLE_COLLATOR: Option<Collator> = title_collator();
}

fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&Default::default(), options)
        .map_err(|e| warn!(error = ?e, "root collator unavailable, using case-folded titles"))
        .ok()
}

/// Dictionary title order under the root collation: accents and case are
/// secondary to the base letters, and lowercase sorts ahead of uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TITLE_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => case_folded(a, b),
    })
}

fn case_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| lowercase_first(a, b))
}

fn lowercase_first(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_titles_ignores_case_before_tiebreak() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zed", "Apple"), Ordering::Greater);
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("Apple", "Apple"), Ordering::Equal);
        assert_eq!(compare_titles("", "a"), Ordering::Less);
    }

    #[test]
    fn compare_titles_places_accented_letters_with_their_base() {
        let mut titles = vec!["Fish", "Zebra", "Éclair", "eel", "Öl", "Ostrich"];
        titles.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(titles, ["Éclair", "eel", "Fish", "Öl", "Ostrich", "Zebra"]);
    }

    #[test]
    fn case_folded_fallback_ignores_case_first() {
        assert_eq!(case_folded("apple", "Banana"), Ordering::Less);
        assert_eq!(case_folded("apple", "Apple"), Ordering::Less);
    }
}
