//! Pagination stage
//!
//! Slices the filtered, ordered rows down to the current page and computes
//! the metadata the renderer needs to enable or disable navigation.

use crate::core::query::QueryState;
use serde::Serialize;

/// One page of rows with metadata about pagination state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The visible rows
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Effective page number (starts at 1, already clamped)
    pub page: usize,

    /// Number of rows per page
    pub page_size: usize,

    /// Total number of rows (after search)
    pub total: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = total_pages(total, page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Number of pages needed for `total` rows, with a floor of 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Pagination stage: the visible slice of `rows` for the current page
///
/// If the current page lies past the last page (typically after a search
/// shrank the result), or is 0, `state.current_page` is reset to 1 before
/// slicing, so the returned rows and `pagination.page` always agree. A page
/// inside the valid range is never modified. The slice is clipped to the
/// available rows.
pub fn paginate<T: Clone>(rows: &[T], state: &mut QueryState) -> Page<T> {
    let page_size = state.page_size();
    let total = rows.len();
    let pages = total_pages(total, page_size);

    if state.current_page > pages || state.current_page == 0 {
        state.current_page = 1;
    }

    let page = state.current_page;
    let start = ((page - 1) * page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        data: rows[start..end].to_vec(),
        pagination: PaginationMeta::new(page, page_size, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(n: usize) -> Vec<char> {
        ('A'..='Z').take(n).collect()
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_total_pages_floor() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_first_page_of_twelve() {
        let rows = letters(12);
        let mut state = QueryState::default();

        let page = paginate(&rows, &mut state);
        assert_eq!(page.data, vec!['A', 'B', 'C', 'D', 'E']);
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_prev);
        assert!(page.pagination.has_next);
    }

    #[test]
    fn test_last_page_is_clipped() {
        let rows = letters(12);
        let mut state = QueryState {
            current_page: 3,
            ..QueryState::default()
        };

        let page = paginate(&rows, &mut state);
        assert_eq!(page.data, vec!['K', 'L']);
        assert_eq!(page.pagination.page, 3);
        assert!(page.pagination.has_prev);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<char> = Vec::new();
        let mut state = QueryState::default();

        let page = paginate(&rows, &mut state);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_prev);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_out_of_range_page_resets_to_one() {
        let rows = letters(4);
        let mut state = QueryState {
            current_page: 3,
            ..QueryState::default()
        };

        let page = paginate(&rows, &mut state);
        assert_eq!(state.current_page, 1);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.data, letters(4));
    }

    #[test]
    fn test_in_range_page_is_not_clamped() {
        let rows = letters(12);
        let mut state = QueryState {
            current_page: 2,
            ..QueryState::default()
        };

        paginate(&rows, &mut state);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_zero_page_and_zero_page_size_are_floored() {
        let rows = letters(3);
        let mut state = QueryState {
            current_page: 0,
            page_size: 0,
            ..QueryState::default()
        };

        let page = paginate(&rows, &mut state);
        assert_eq!(state.current_page, 1);
        assert_eq!(page.data, vec!['A']);
        assert_eq!(page.pagination.page_size, 1);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_never_exceeds_page_size() {
        for total in 0..=23 {
            for page_size in 1..=7 {
                let rows = letters(total);
                let pages = total_pages(total, page_size);
                for current_page in 1..=pages + 1 {
                    let mut state = QueryState {
                        current_page,
                        page_size,
                        ..QueryState::default()
                    };
                    let page = paginate(&rows, &mut state);
                    assert!(page.data.len() <= page_size);
                    assert_eq!(page.pagination.total_pages, pages);
                }
            }
        }
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let rows = letters(12);
        let mut state = QueryState {
            current_page: 2,
            ..QueryState::default()
        };

        let first = paginate(&rows, &mut state);
        let second = paginate(&rows, &mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_past_last_page_clamps_lazily() {
        let rows = letters(12);
        let mut state = QueryState {
            current_page: 3,
            ..QueryState::default()
        };

        state.next_page();
        // Overshoot is visible until the next pagination pass
        assert_eq!(state.current_page, 4);

        let page = paginate(&rows, &mut state);
        assert_eq!(state.current_page, 1);
        assert_eq!(page.data, letters(5));
    }
}
