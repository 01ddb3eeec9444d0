//! Pagination of filtered views.

use serde::Serialize;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// One page of a larger result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice out a 1-based page.
///
/// A zero page size falls back to [`DEFAULT_PAGE_SIZE`]; page numbers are
/// clamped into `1..=total_pages` (page 1 when there are no items).
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paginate_middle_and_last_page() {
        let items: Vec<u32> = (1..=7).collect();

        let second = paginate(&items, 2, 3);
        assert_eq!(second.items, vec![4, 5, 6]);
        assert_eq!(second.total_pages, 3);
        assert!(second.has_next());

        let last = paginate(&items, 3, 3);
        assert_eq!(last.items, vec![7]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_clamps_page_numbers() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 0, 3).page, 1);

        let beyond = paginate(&items, 99, 3);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items, vec![7]);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate::<u32>(&[], 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let items: Vec<u32> = (0..120).collect();
        let page = paginate(&items, 1, 0);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items.len(), 50);
        assert_eq!(page.total_pages, 3);
    }
}
