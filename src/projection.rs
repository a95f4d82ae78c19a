//! The filtered and searched view of a transaction collection.
//!
//! [`project`] is a pure function of the collection and the two view-state fields. [`Projection`]
//! memoizes its result against the store version so repeated renders of an unchanged store do not
//! rescan the collection.

use crate::model::{Category, Transaction};
use crate::store::Store;
use tracing::trace;

/// Returns the records of `transactions` that match both filters, in their original order.
///
/// - `category`: when `Some`, a record must be filed under exactly this category.
/// - `query`: trimmed and lower-cased, then matched as a substring of the lower-cased merchant.
///   An empty or whitespace-only query matches everything.
pub fn project<'a>(
    transactions: &'a [Transaction],
    category: Option<Category>,
    query: &str,
) -> Vec<&'a Transaction> {
    let needle = normalize_query(query);
    transactions
        .iter()
        .filter(|t| matches(t, category, &needle))
        .collect()
}

/// Trims and case-folds a search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// The predicate behind [`project`]. `needle` must already be normalized.
fn matches(t: &Transaction, category: Option<Category>, needle: &str) -> bool {
    let category_ok = category.map_or(true, |c| t.is_in(c));
    let text_ok = needle.is_empty() || t.merchant.to_lowercase().contains(needle);
    category_ok && text_ok
}

/// A memoized projection of a [`Store`].
///
/// The cached ids are valid for the key (store version, category, query) they were computed
/// with. Any store mutation bumps the version, so a stale cache is never served.
#[derive(Debug, Default, Clone)]
pub struct Projection {
    key: Option<(u64, Option<Category>, String)>,
    ids: Vec<usize>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible records of `store`, recomputing only when the key has changed.
    pub fn view<'a>(&mut self, store: &'a Store) -> Vec<&'a Transaction> {
        if !self.is_fresh(store) {
            trace!("Recomputing projection for store version {}", store.version());
            let category = store.selected_category();
            let needle = normalize_query(store.search_query());
            self.ids = store
                .transactions()
                .iter()
                .enumerate()
                .filter(|(_, t)| matches(t, category, &needle))
                .map(|(ix, _)| ix)
                .collect();
            self.key = Some((
                store.version(),
                category,
                store.search_query().to_string(),
            ));
        }
        self.ids
            .iter()
            .filter_map(|&ix| store.transactions().get(ix))
            .collect()
    }

    /// Returns true if the last call to `view` was served for `store`'s current state.
    pub fn is_fresh(&self, store: &Store) -> bool {
        match &self.key {
            Some((version, category, query)) => {
                *version == store.version()
                    && *category == store.selected_category()
                    && query == store.search_query()
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_transactions;
    use crate::test::record;

    fn merchants(view: &[&Transaction]) -> Vec<String> {
        view.iter().map(|t| t.merchant.clone()).collect()
    }

    #[test]
    fn test_groceries_in_seed_order() {
        let seed = seed_transactions();
        let view = project(&seed, Some(Category::Groceries), "");
        assert_eq!(
            merchants(&view),
            vec!["Whole Foods", "Mama Success Supermarket", "Bakangizo"]
        );
    }

    #[test]
    fn test_search_bolt() {
        let seed = seed_transactions();
        let view = project(&seed, None, "bolt");
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].merchant, "Bolt");
        assert_eq!(view[0].category, "Transportation");
        assert_eq!(view[0].amount, crate::model::Amount::from_minor(-5500));
    }

    #[test]
    fn test_no_filter_is_identity() {
        let seed = seed_transactions();
        let view = project(&seed, None, "");
        assert_eq!(view.len(), seed.len());
        assert!(view.iter().zip(seed.iter()).all(|(a, b)| *a == b));
        assert_eq!(project(&seed, None, "   \t").len(), seed.len());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let seed = seed_transactions();
        for category in Category::ALL {
            for query in ["", "a", "o", "ber", "SPOT", "  mama ", "zzz"] {
                let both = project(&seed, Some(category), query);
                let by_category = project(&seed, Some(category), "");
                let by_text = project(&seed, None, query);
                let expected: Vec<&Transaction> = seed
                    .iter()
                    .filter(|t| {
                        by_category.iter().any(|c| std::ptr::eq(*c, *t))
                            && by_text.iter().any(|q| std::ptr::eq(*q, *t))
                    })
                    .collect();
                assert_eq!(both, expected, "{category} / {query:?}");
            }
        }
    }

    #[test]
    fn test_search_ignores_case_and_outer_whitespace() {
        let seed = seed_transactions();
        let padded = project(&seed, None, "  whole");
        let upper = project(&seed, None, "WHOLE");
        assert_eq!(padded, upper);
        assert_eq!(merchants(&padded), vec!["Whole Foods"]);
    }

    #[test]
    fn test_search_is_an_unanchored_substring() {
        let seed = seed_transactions();
        assert_eq!(merchants(&project(&seed, None, "ber")), vec!["Uber"]);
        // inner whitespace is significant
        assert!(project(&seed, None, "whole  foods").is_empty());
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let items = vec![
            record("a", "Lowercase", "dining"),
            record("b", "Proper", "Dining"),
        ];
        let view = project(&items, Some(Category::Dining), "");
        assert_eq!(merchants(&view), vec!["Proper"]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(project(&[], Some(Category::Dining), "x").is_empty());
        assert!(project(&[], None, "").is_empty());
    }

    #[test]
    fn test_memo_tracks_store_state() {
        let mut store = Store::new();
        let mut projection = Projection::new();
        assert!(!projection.is_fresh(&store));

        assert_eq!(projection.view(&store).len(), 18);
        assert!(projection.is_fresh(&store));

        store.set_search_query("uber");
        assert!(!projection.is_fresh(&store));
        assert_eq!(merchants(&projection.view(&store)), vec!["Uber"]);

        store.prepend(record("x", "Uber Eats", "Dining"));
        assert_eq!(
            merchants(&projection.view(&store)),
            vec!["Uber Eats", "Uber"]
        );

        store.set_category_filter(Some(Category::Transportation));
        assert_eq!(merchants(&projection.view(&store)), vec!["Uber"]);
    }
}
