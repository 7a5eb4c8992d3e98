//! Client-side pagination over the in-memory result set.

use std::ops::Range;

/// Listings shown per page.
pub const PAGE_SIZE: usize = 20;

/// Total page count for a result set of `count` listings (0 when empty).
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Index range of a 1-based page into the result set. Empty for page 0 or
/// pages past the end.
pub fn page_range(page: usize, count: usize) -> Range<usize> {
    if page == 0 || page > total_pages(count) {
        return 0..0;
    }
    let start = (page - 1) * PAGE_SIZE;
    start..(start + PAGE_SIZE).min(count)
}

/// Cursor over the pages of one result set.
///
/// Navigation moves by exactly one page and never leaves `[1, total_pages]`;
/// the `has_*` predicates drive the enabled state of the navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    count: usize,
}

impl Pager {
    pub fn new(count: usize) -> Self {
        Self { page: 1, count }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.count)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Range of the current page within the result set.
    pub fn range(&self) -> Range<usize> {
        page_range(self.page, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(20), 1);
        assert_eq!(total_pages(21), 2);
        assert_eq!(total_pages(45), 3);
        assert_eq!(total_pages(100), 5);
    }

    #[test]
    fn page_ranges_for_45_listings() {
        assert_eq!(page_range(1, 45), 0..20);
        assert_eq!(page_range(2, 45), 20..40);
        assert_eq!(page_range(3, 45), 40..45);
        assert!(page_range(4, 45).is_empty());
        assert!(page_range(0, 45).is_empty());
    }

    #[test]
    fn first_page_holds_min_of_count_and_page_size() {
        assert_eq!(page_range(1, 5).len(), 5);
        assert_eq!(page_range(1, 20).len(), 20);
        assert_eq!(page_range(1, 99).len(), 20);
    }

    #[test]
    fn last_page_holds_remainder() {
        // N - 20 * (totalPages - 1)
        let count = 45;
        let last = total_pages(count);
        assert_eq!(page_range(last, count).len(), count - PAGE_SIZE * (last - 1));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut pager = Pager::new(45);
        assert!(!pager.has_prev());
        assert!(!pager.prev());
        assert_eq!(pager.page(), 1);

        assert!(pager.next());
        assert!(pager.next());
        assert_eq!(pager.page(), 3);
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn next_then_prev_returns_to_same_slice() {
        let mut pager = Pager::new(45);
        let before = pager.range();
        assert!(pager.next());
        assert!(pager.prev());
        assert_eq!(pager.range(), before);
    }

    #[test]
    fn empty_result_set_has_no_pages() {
        let pager = Pager::new(0);
        assert_eq!(pager.total_pages(), 0);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert!(pager.range().is_empty());
    }

    #[test]
    fn single_page_disables_both_controls() {
        let pager = Pager::new(12);
        assert_eq!(pager.total_pages(), 1);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert_eq!(pager.range(), 0..12);
    }
}
