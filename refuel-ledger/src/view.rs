//! Pagination and presentation view-state
//!
//! Nothing here touches ledger records; the table view refers to rows by
//! plate so expansion survives paging and new submissions.

use crate::types::PlateId;
use std::collections::HashSet;

/// One page of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],

    /// 1-based page number after clamping
    pub number: usize,

    /// Total number of pages (at least 1)
    pub count: usize,

    /// Index of the first item in the full sequence
    pub offset: usize,
}

impl<T> Page<'_, T> {
    /// A page exists before this one
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// A page exists after this one
    pub fn has_next(&self) -> bool {
        self.number < self.count
    }
}

/// Number of pages for `len` items, never less than 1
pub fn page_count(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Clamp a 1-based page number into `1..=page_count`
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(len, page_size))
}

/// Slice `[(page-1)*size, page*size)` of `items`, clamped to the bounds
pub fn page<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let count = page_count(items.len(), page_size);
    let number = page.clamp(1, count);

    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        count,
        offset: start,
    }
}

/// Presentation-owned table state: current page and expanded rows
#[derive(Debug, Clone)]
pub struct ViewState {
    page_size: usize,
    current_page: usize,
    expanded: HashSet<PlateId>,
}

impl ViewState {
    /// Start on page 1 with nothing expanded
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            expanded: HashSet::new(),
        }
    }

    /// Records per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, clamped against `len` items
    pub fn current_page(&self, len: usize) -> usize {
        clamp_page(self.current_page, len, self.page_size)
    }

    /// Slice of `items` for the current page
    pub fn current<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        page(items, self.page_size, self.current_page)
    }

    /// Move forward, stopping at the last page
    pub fn next_page(&mut self, len: usize) -> usize {
        self.go_to(self.current_page(len).saturating_add(1), len)
    }

    /// Move back, stopping at page 1
    pub fn previous_page(&mut self, len: usize) -> usize {
        self.go_to(self.current_page(len).saturating_sub(1), len)
    }

    /// Jump to a page, clamped
    pub fn go_to(&mut self, page: usize, len: usize) -> usize {
        self.current_page = clamp_page(page, len, self.page_size);
        self.current_page
    }

    /// Flip a row between expanded and collapsed, returning the new state
    pub fn toggle_expanded(&mut self, plate_id: &PlateId) -> bool {
        if self.expanded.remove(plate_id) {
            false
        } else {
            self.expanded.insert(plate_id.clone());
            true
        }
    }

    /// Row shows its refuel history
    pub fn is_expanded(&self, plate_id: &PlateId) -> bool {
        self.expanded.contains(plate_id)
    }
}
