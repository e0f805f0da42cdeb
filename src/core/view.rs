//! Renderer-facing snapshot of the table

use crate::core::pagination::Page;
use crate::core::query::{QueryState, SortDirection, SortKey};
use crate::core::row::Product;
use serde::Serialize;

/// Whether rows have been delivered by the product source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Waiting for the product source
    #[default]
    Loading,
    /// Rows are available
    Loaded,
    /// The product source failed; the table stays empty
    Failed { message: String },
}

/// A sort button: its label and whether it is the active sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortControl {
    pub key: SortKey,
    pub label: String,
    pub active: bool,
}

impl SortControl {
    fn new(key: SortKey, state: &QueryState) -> Self {
        let active = state.sort_key == Some(key);
        let base = format!("Sort by {}", key);
        let label = if active {
            format!("{} ({})", base, state.sort_direction.label_for(key))
        } else {
            base
        };

        Self { key, label, active }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub page: Page<Product>,
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
    pub status: LoadStatus,
    /// `Total: N products`, or the load failure message
    pub summary: String,
    /// `Page X / Y`
    pub page_label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Price and title sort buttons, in that order
    pub sort_controls: Vec<SortControl>,
}

impl TableView {
    pub fn new(page: Page<Product>, state: &QueryState, status: LoadStatus) -> Self {
        let meta = page.pagination;
        let summary = match &status {
            LoadStatus::Failed { message } => format!("Failed to load data: {}", message),
            _ => format!("Total: {} products", meta.total),
        };

        Self {
            summary,
            page_label: format!("Page {} / {}", meta.page, meta.total_pages),
            prev_enabled: meta.has_prev,
            next_enabled: meta.has_next,
            sort_key: state.sort_key,
            sort_direction: state.sort_direction,
            sort_controls: vec![
                SortControl::new(SortKey::Price, state),
                SortControl::new(SortKey::Title, state),
            ],
            status,
            page,
        }
    }

    /// The visible rows
    pub fn rows(&self) -> &[Product] {
        &self.page.data
    }

    /// Sort control for a column
    pub fn sort_control(&self, key: SortKey) -> Option<&SortControl> {
        self.sort_controls.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pagination::paginate;

    fn view_for(rows: &[Product], state: &mut QueryState, status: LoadStatus) -> TableView {
        let page = paginate(rows, state);
        TableView::new(page, state, status)
    }

    #[test]
    fn test_labels() {
        let rows: Vec<Product> = (1..=12)
            .map(|i| Product::new(i, format!("item {}", i), i as f64))
            .collect();
        let mut state = QueryState::default();
        state.current_page = 2;

        let view = view_for(&rows, &mut state, LoadStatus::Loaded);
        assert_eq!(view.summary, "Total: 12 products");
        assert_eq!(view.page_label, "Page 2 / 3");
        assert!(view.prev_enabled);
        assert!(view.next_enabled);
        assert_eq!(view.rows().len(), 5);
    }

    #[test]
    fn test_sort_control_labels() {
        let mut state = QueryState::default();
        let view = view_for(&[], &mut state, LoadStatus::Loaded);
        assert_eq!(view.sort_control(SortKey::Price).unwrap().label, "Sort by price");
        assert!(!view.sort_control(SortKey::Title).unwrap().active);

        state.toggle_sort(SortKey::Title);
        state.toggle_sort(SortKey::Title);
        let view = view_for(&[], &mut state, LoadStatus::Loaded);
        let title = view.sort_control(SortKey::Title).unwrap();
        assert!(title.active);
        assert_eq!(title.label, "Sort by title (Z→A)");
        assert_eq!(view.sort_direction, SortDirection::Descending);

        state.toggle_sort(SortKey::Price);
        let view = view_for(&[], &mut state, LoadStatus::Loaded);
        assert_eq!(
            view.sort_control(SortKey::Price).unwrap().label,
            "Sort by price (ascending)"
        );
        assert!(!view.sort_control(SortKey::Title).unwrap().active);
    }

    #[test]
    fn test_failed_status_summary() {
        let mut state = QueryState::default();
        let view = view_for(
            &[],
            &mut state,
            LoadStatus::Failed {
                message: "GET /products failed: 500".to_string(),
            },
        );

        assert_eq!(view.summary, "Failed to load data: GET /products failed: 500");
        assert!(!view.prev_enabled);
        assert!(!view.next_enabled);
    }
}
