//! Query state and the filter-sort stage
//!
//! [`QueryState`] holds the five values the UI controls (search term, sort
//! key, sort direction, current page, page size). [`compute_visible`] turns
//! the full row set plus that state into the filtered, ordered sequence that
//! the pagination stage slices.

use crate::core::filters::normalize;
use crate::core::row::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column a table can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Price => "price",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "title" => Ok(SortKey::Title),
            "price" => Ok(SortKey::Price),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Human-readable label for this direction on a given column
    pub fn label_for(self, key: SortKey) -> &'static str {
        match (key, self) {
            (SortKey::Title, SortDirection::Ascending) => "A→Z",
            (SortKey::Title, SortDirection::Descending) => "Z→A",
            (SortKey::Price, SortDirection::Ascending) => "ascending",
            (SortKey::Price, SortDirection::Descending) => "descending",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Mutable query state driving both pipeline stages
///
/// Owned by a single controller and mutated only through its event handlers.
/// Deserializes with defaults, so a partial state (`{"search_term": "shirt"}`)
/// is valid.
///
/// # Example
/// ```rust,ignore
/// let mut state = QueryState::default();
/// state.set_search_term("shirt");
/// state.toggle_sort(SortKey::Price);
///
/// let ordered = compute_visible(&rows, &state);
/// let page = paginate(&ordered, &mut state);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Raw search input, normalized at query time
    pub search_term: String,

    /// Active sort column, `None` keeps input order
    pub sort_key: Option<SortKey>,

    pub sort_direction: SortDirection,

    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub current_page: usize,

    /// Number of rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

pub(crate) fn default_page_size() -> usize {
    5
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            current_page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl QueryState {
    /// Create a state with a custom page size
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Get page size, ensuring minimum of 1
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.current_page.max(1)
    }

    /// Normalized search term
    pub fn query(&self) -> String {
        normalize(&self.search_term)
    }

    /// Replace the search term
    ///
    /// The page is not touched here: the debounced recomputation that follows
    /// a keystroke is what resets it to 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Activate a sort column
    ///
    /// Reactivating the active column flips the direction, activating another
    /// column makes it active in ascending order. Either way the page resets
    /// to 1.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == Some(key) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = Some(key);
            self.sort_direction = SortDirection::Ascending;
        }
        self.current_page = 1;
    }

    /// Change the page size (floor 1) and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Step back one page; returns false on the first page
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one page, unconditionally
    ///
    /// Overrunning the last page is corrected by the next pagination pass,
    /// which resets the page to 1.
    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }
}

/// Filter-sort stage: the rows matching the search term, in display order
///
/// Rows whose normalized title contains the normalized search term are kept
/// (all rows for an empty term). Without a sort key the input order is kept;
/// otherwise rows are stably sorted by normalized title or by price, with
/// ties keeping their input order in both directions.
pub fn compute_visible<'a>(rows: &'a [Product], state: &QueryState) -> Vec<&'a Product> {
    let q = state.query();

    let filtered = rows.iter().filter(|row| q.is_empty() || row.normalized_title().contains(&q));

    let Some(key) = state.sort_key else {
        return filtered.collect();
    };

    let direction = state.sort_direction;
    match key {
        SortKey::Title => {
            let mut keyed: Vec<(String, &Product)> =
                filtered.map(|row| (row.normalized_title(), row)).collect();
            keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
            keyed.into_iter().map(|(_, row)| row).collect()
        }
        SortKey::Price => {
            let mut out: Vec<&Product> = filtered.collect();
            out.sort_by(|a, b| direction.apply(a.price_value().total_cmp(&b.price_value())));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Classic Red Shirt", 30.0),
            Product::new(2, "  blue jeans", 45.0),
            Product::new(3, "Red Sneakers", 30.0),
            Product::new(4, "Alarm Clock", 12.5),
            Product::new(5, "red cap", 8.0),
        ]
    }

    fn ids(rows: &[&Product]) -> Vec<i64> {
        rows.iter()
            .map(|p| p.id.as_ref().and_then(|v| v.as_i64()).unwrap())
            .collect()
    }

    #[test]
    fn test_query_state_defaults() {
        let state = QueryState::default();
        assert_eq!(state.search_term, "");
        assert_eq!(state.sort_key, None);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 5);
    }

    #[test]
    fn test_partial_state_deserializes_with_defaults() {
        let state: QueryState =
            serde_json::from_str(r#"{"search_term": "shirt", "sort_key": "price"}"#).unwrap();
        assert_eq!(state.search_term, "shirt");
        assert_eq!(state.sort_key, Some(SortKey::Price));
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 5);
    }

    #[test]
    fn test_empty_search_without_sort_is_identity() {
        let rows = catalog();
        let state = QueryState::default();
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_whitespace_search_is_empty() {
        let rows = catalog();
        let mut state = QueryState::default();
        state.set_search_term("   ");
        assert_eq!(compute_visible(&rows, &state).len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let rows = catalog();
        let mut state = QueryState::default();
        state.set_search_term("  RED ");

        let visible = compute_visible(&rows, &state);
        assert_eq!(ids(&visible), vec![1, 3, 5]);

        for row in &rows {
            let included = visible.iter().any(|v| v.id == row.id);
            assert_eq!(included, row.normalized_title().contains("red"));
        }
    }

    #[test]
    fn test_search_matches_unanchored_substring() {
        let rows = catalog();
        let mut state = QueryState::default();
        state.set_search_term("ea");
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![2, 3]);
    }

    #[test]
    fn test_missing_title_matches_only_empty_search() {
        let rows = vec![Product::default(), Product::new(1, "Lamp", 10.0)];
        let mut state = QueryState::default();
        assert_eq!(compute_visible(&rows, &state).len(), 2);

        state.set_search_term("l");
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![1]);
    }

    #[test]
    fn test_sort_by_title() {
        let rows = catalog();
        let mut state = QueryState::default();
        state.toggle_sort(SortKey::Title);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![4, 2, 1, 5, 3]);

        state.toggle_sort(SortKey::Title);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![3, 5, 1, 2, 4]);
    }

    #[test]
    fn test_sort_by_title_is_stable_in_both_directions() {
        let rows = vec![
            Product::new(1, "Lamp", 20.0),
            Product::new(2, " lamp ", 10.0),
            Product::new(3, "LAMP", 30.0),
            Product::new(4, "Desk", 40.0),
        ];
        let mut state = QueryState::default();

        state.toggle_sort(SortKey::Title);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![4, 1, 2, 3]);

        // Equal normalized titles keep their input order, not the reverse
        state.toggle_sort(SortKey::Title);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_title_sorts_first_ascending() {
        let rows = vec![Product::new(1, "Lamp", 10.0), Product::default()];
        let mut state = QueryState::default();
        state.toggle_sort(SortKey::Title);

        let visible = compute_visible(&rows, &state);
        assert_eq!(visible[0].title(), "");
    }

    #[test]
    fn test_sort_by_price_is_stable_in_both_directions() {
        let rows = catalog();
        let mut state = QueryState::default();

        state.toggle_sort(SortKey::Price);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![5, 4, 1, 3, 2]);

        state.toggle_sort(SortKey::Price);
        // 1 and 3 share a price and keep their input order
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_distinct_prices_reverse_exactly() {
        let rows: Vec<Product> = [7.0, 3.0, 9.5, 1.0, 4.25]
            .iter()
            .enumerate()
            .map(|(i, p)| Product::new(i as i64, format!("item {}", i), *p))
            .collect();
        let mut state = QueryState::default();

        state.toggle_sort(SortKey::Price);
        let ascending = ids(&compute_visible(&rows, &state));
        state.toggle_sort(SortKey::Price);
        let mut descending = ids(&compute_visible(&rows, &state));
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_missing_price_sorts_as_zero() {
        let mut no_price = Product::new(9, "Mystery", 0.0);
        no_price.price = None;
        let rows = vec![Product::new(1, "Cheap", 0.5), no_price];

        let mut state = QueryState::default();
        state.toggle_sort(SortKey::Price);
        assert_eq!(ids(&compute_visible(&rows, &state)), vec![9, 1]);
    }

    #[test]
    fn test_toggle_sort_switches_key_and_resets_direction() {
        let mut state = QueryState::default();
        state.toggle_sort(SortKey::Price);
        state.toggle_sort(SortKey::Price);
        assert_eq!(state.sort_direction, SortDirection::Descending);

        state.toggle_sort(SortKey::Price);
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        state.toggle_sort(SortKey::Price);
        state.toggle_sort(SortKey::Title);
        assert_eq!(state.sort_key, Some(SortKey::Title));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_sort_resets_page() {
        let mut state = QueryState::default();
        state.current_page = 3;
        state.toggle_sort(SortKey::Title);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_set_page_size_floors_at_one() {
        let mut state = QueryState::default();
        state.current_page = 2;
        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_previous_page_stops_at_one() {
        let mut state = QueryState::default();
        assert!(!state.previous_page());
        assert_eq!(state.current_page, 1);

        state.current_page = 2;
        assert!(state.previous_page());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("Price".parse::<SortKey>(), Ok(SortKey::Price));
        assert_eq!(" title ".parse::<SortKey>(), Ok(SortKey::Title));
        assert!("rating".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<Product> = Vec::new();
        let mut state = QueryState::default();
        state.toggle_sort(SortKey::Price);
        state.set_search_term("x");
        assert!(compute_visible(&rows, &state).is_empty());
    }
}
