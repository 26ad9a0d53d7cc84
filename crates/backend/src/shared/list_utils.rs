//! List helpers: sorting and paging
use std::cmp::Ordering;

/// Items that can be compared by a selectable field
pub trait Sortable {
    type Field: Copy;

    /// Compares two items by the given field
    fn compare_by_field(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// Stable sort by the given field; ties keep their original order
pub fn sort_list<T: Sortable>(items: &mut [T], field: T::Field, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Position of a page within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page, clamped to the available pages
    pub page: usize,
    pub total_pages: usize,
    /// Slice bounds into the list
    pub start: usize,
    pub end: usize,
}

/// Compute the window for a 1-based page of `page_size` items
pub fn page_window(total: usize, page: usize, page_size: usize) -> PageWindow {
    let total_pages = if page_size == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    };
    let page = page.clamp(1, total_pages.max(1));
    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);

    PageWindow {
        page,
        total_pages,
        start,
        end,
    }
}
