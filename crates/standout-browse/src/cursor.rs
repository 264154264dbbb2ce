//! Page cursor: the current window over a filtered collection.
//!
//! A [`PageCursor`] owns `{page_index, page_size, total_items}` and keeps
//! `1 <= page_index <= total_pages` after every operation. Navigation past
//! either end is a no-op; invalid configuration is rejected with an error and
//! leaves the cursor untouched.

use std::ops::Range;

use serde::Serialize;

use crate::error::{BrowseError, Result};

/// Page size used by [`PageCursor::default`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Why the item count given to [`PageCursor::set_total_items`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountChange {
    /// New filter criteria produced the count. The cursor returns to page 1.
    FilterChange,
    /// Same criteria, recounted (e.g. the source data changed). The cursor
    /// keeps its page, clamped to the new last page.
    Recount,
}

/// Stateful pagination over a collection the cursor never sees.
///
/// # Example
///
/// ```
/// use standout_browse::{CountChange, PageCursor};
///
/// let mut cursor = PageCursor::new(10).unwrap();
/// cursor.set_total_items(23, CountChange::FilterChange);
/// assert_eq!(cursor.total_pages(), 3);
///
/// cursor.next();
/// cursor.next();
/// cursor.next(); // already on the last page: no-op
/// assert_eq!(cursor.page_index(), 3);
/// assert_eq!(cursor.window(), 20..30);
///
/// cursor.set_total_items(23, CountChange::FilterChange);
/// assert_eq!(cursor.page_index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page_index: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        PageCursor {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl PageCursor {
    /// Creates a cursor on page 1 of an empty collection.
    pub fn new(page_size: usize) -> Result<Self> {
        validate_page_size(page_size)?;
        Ok(PageCursor {
            page_size,
            ..PageCursor::default()
        })
    }

    /// Returns the current page, starting at 1.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of items being paged over.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the page count, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages()
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Updates the item count.
    ///
    /// A [`CountChange::FilterChange`] resets to page 1; a
    /// [`CountChange::Recount`] keeps the page, clamped to the last page.
    pub fn set_total_items(&mut self, total_items: usize, change: CountChange) {
        self.total_items = total_items;
        match change {
            CountChange::FilterChange => self.page_index = 1,
            CountChange::Recount => self.clamp(),
        }
    }

    /// Changes the page size and re-clamps the current page.
    ///
    /// A zero size is rejected and the cursor is left unchanged.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        self.clamp();
        Ok(())
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Jumps to the first page. Returns `false` if already there.
    pub fn first(&mut self) -> bool {
        let moved = self.page_index != 1;
        self.page_index = 1;
        moved
    }

    /// Jumps to the last page. Returns `false` if already there.
    pub fn last(&mut self) -> bool {
        let last = self.total_pages();
        let moved = self.page_index != last;
        self.page_index = last;
        moved
    }

    /// Jumps to a specific page.
    ///
    /// Pages outside `1..=total_pages` are rejected and the cursor is left
    /// unchanged.
    pub fn go_to(&mut self, page: usize) -> Result<()> {
        let total_pages = self.total_pages();
        if page == 0 || page > total_pages {
            return Err(BrowseError::PageOutOfRange { page, total_pages });
        }
        self.page_index = page;
        Ok(())
    }

    /// Returns the half-open item range of the current page.
    ///
    /// The end is not clamped to the collection length; use
    /// [`clamped_window`](Self::clamped_window) or [`page_of`](Self::page_of)
    /// when the collection is at hand.
    pub fn window(&self) -> Range<usize> {
        let start = (self.page_index - 1).saturating_mul(self.page_size);
        start..start.saturating_add(self.page_size)
    }

    /// Returns the current window clamped to a collection of length `len`.
    pub fn clamped_window(&self, len: usize) -> Range<usize> {
        let window = self.window();
        window.start.min(len)..window.end.min(len)
    }

    /// Slices the current page out of a collection.
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.clamped_window(items.len())]
    }

    /// Returns a serializable snapshot of the cursor for display.
    pub fn info(&self) -> PageInfo {
        PageInfo {
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    fn clamp(&mut self) {
        self.page_index = self.page_index.clamp(1, self.total_pages());
    }
}

fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(BrowseError::InvalidPageSize { size: page_size });
    }
    Ok(())
}

/// Point-in-time view of a [`PageCursor`], for templates and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(page_size: usize, total_items: usize) -> PageCursor {
        let mut cursor = PageCursor::new(page_size).unwrap();
        cursor.set_total_items(total_items, CountChange::FilterChange);
        cursor
    }

    #[test]
    fn default_cursor() {
        let cursor = PageCursor::default();
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(cursor.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(cursor.total_items(), 0);
        assert_eq!(cursor.total_pages(), 1);
    }

    #[test]
    fn zero_page_size_rejected() {
        assert!(matches!(
            PageCursor::new(0),
            Err(BrowseError::InvalidPageSize { size: 0 })
        ));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(cursor(10, 0).total_pages(), 1);
        assert_eq!(cursor(10, 1).total_pages(), 1);
        assert_eq!(cursor(10, 10).total_pages(), 1);
        assert_eq!(cursor(10, 11).total_pages(), 2);
        assert_eq!(cursor(10, 23).total_pages(), 3);
        assert_eq!(cursor(1, 5).total_pages(), 5);
    }

    #[test]
    fn next_and_previous_clamp() {
        let mut c = cursor(10, 23);

        assert!(!c.previous());
        assert_eq!(c.page_index(), 1);

        assert!(c.next());
        assert!(c.next());
        assert!(!c.next());
        assert_eq!(c.page_index(), 3);

        assert!(c.previous());
        assert_eq!(c.page_index(), 2);
    }

    #[test]
    fn filter_change_resets_recount_clamps() {
        let mut c = cursor(10, 23);
        c.last();
        assert_eq!(c.page_index(), 3);

        c.set_total_items(23, CountChange::FilterChange);
        assert_eq!(c.page_index(), 1);

        c.last();
        c.set_total_items(25, CountChange::Recount);
        assert_eq!(c.page_index(), 3);

        c.set_total_items(12, CountChange::Recount);
        assert_eq!(c.page_index(), 2);

        c.set_total_items(0, CountChange::Recount);
        assert_eq!(c.page_index(), 1);
        assert_eq!(c.total_pages(), 1);
    }

    #[test]
    fn set_page_size_reclamps() {
        let mut c = cursor(5, 23);
        c.go_to(5).unwrap();

        c.set_page_size(10).unwrap();
        assert_eq!(c.total_pages(), 3);
        assert_eq!(c.page_index(), 3);

        c.set_page_size(2).unwrap();
        assert_eq!(c.total_pages(), 12);
        assert_eq!(c.page_index(), 3);
    }

    #[test]
    fn invalid_page_size_leaves_state() {
        let mut c = cursor(5, 23);
        c.next();
        let before = c.clone();

        assert!(matches!(
            c.set_page_size(0),
            Err(BrowseError::InvalidPageSize { size: 0 })
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn go_to_validates() {
        let mut c = cursor(10, 23);

        c.go_to(2).unwrap();
        assert_eq!(c.page_index(), 2);

        assert!(matches!(
            c.go_to(0),
            Err(BrowseError::PageOutOfRange { page: 0, total_pages: 3 })
        ));
        assert!(matches!(
            c.go_to(4),
            Err(BrowseError::PageOutOfRange { page: 4, total_pages: 3 })
        ));
        assert_eq!(c.page_index(), 2);
    }

    #[test]
    fn first_and_last_report_movement() {
        let mut c = cursor(10, 23);
        assert!(!c.first());
        assert!(c.last());
        assert!(!c.last());
        assert!(c.first());
    }

    #[test]
    fn window_and_clamping() {
        let mut c = cursor(10, 23);
        assert_eq!(c.window(), 0..10);

        c.last();
        assert_eq!(c.window(), 20..30);
        assert_eq!(c.clamped_window(23), 20..23);
        assert_eq!(c.clamped_window(5), 5..5);

        let items: Vec<u32> = (0..23).collect();
        assert_eq!(c.page_of(&items), &[20, 21, 22]);
    }

    #[test]
    fn empty_collection_window() {
        let c = cursor(10, 0);
        let items: Vec<u32> = Vec::new();
        assert!(c.page_of(&items).is_empty());
        assert!(!c.has_next());
        assert!(!c.has_previous());
    }

    #[test]
    fn info_snapshot_serializes() {
        let mut c = cursor(10, 23);
        c.next();

        let info = c.info();
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next && info.has_previous);

        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["pageIndex"], 2);
        assert_eq!(json["totalItems"], 23);
        assert_eq!(json["hasPrevious"], true);
    }
}
