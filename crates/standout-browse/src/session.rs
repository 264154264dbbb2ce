//! Browsing session: one collection, one cursor, a stream of descriptors.
//!
//! [`BrowseSession`] ties the engine and the cursor together the way a list
//! screen uses them: every interaction produces a new [`QueryDescriptor`],
//! the session re-evaluates from scratch, and the cursor is told whether the
//! count came from new criteria (back to page 1) or a recount (page kept).
//!
//! A session is plain mutable state. Own it from one place and mutate it
//! sequentially.

use crate::cursor::{CountChange, PageCursor};
use crate::descriptor::QueryDescriptor;
use crate::engine::QueryEngine;
use crate::error::Result;
use crate::record::Record;
use crate::summary::ResultSummary;

/// Filtered, sorted, paginated view over an owned record collection.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_browse::{BrowseSession, QueryDescriptor};
///
/// let records: Vec<_> = (1..=23)
///     .map(|n| json!({ "title": format!("Course {n}"), "price": n }))
///     .collect();
///
/// let mut session = BrowseSession::new(records, ["title"]);
/// assert_eq!(session.cursor().total_pages(), 3);
///
/// session.next_page();
/// session.apply(QueryDescriptor::new().search("course 1"));
/// assert_eq!(session.cursor().page_index(), 1);
/// assert_eq!(session.result_count(), 11); // 1, 10..=19
/// assert_eq!(
///     session.summary().to_string(),
///     r#"Showing 10 of 11 results for "course 1""#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BrowseSession<T> {
    records: Vec<T>,
    search_fields: Vec<String>,
    engine: QueryEngine,
    descriptor: QueryDescriptor,
    version: Option<u64>,
    results: Vec<usize>,
    cursor: PageCursor,
}

impl<T: Record> BrowseSession<T> {
    /// Starts a session over `records` with the default engine, an unfiltered
    /// descriptor and the default page size.
    pub fn new<I, S>(records: Vec<T>, search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = BrowseSession {
            records,
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            engine: QueryEngine::default(),
            descriptor: QueryDescriptor::default(),
            version: None,
            results: Vec::new(),
            cursor: PageCursor::default(),
        };
        session.refresh(CountChange::FilterChange);
        session
    }

    /// Replaces the engine and re-evaluates from page 1.
    pub fn with_engine(mut self, engine: QueryEngine) -> Self {
        self.engine = engine;
        self.refresh(CountChange::FilterChange);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
        self.cursor.set_page_size(page_size)?;
        Ok(self)
    }

    // ========================================================================
    // Query updates
    // ========================================================================

    /// Applies a new descriptor.
    ///
    /// A descriptor different from the current one counts as a filter change
    /// and returns to page 1; an identical one is a recount.
    pub fn apply(&mut self, descriptor: QueryDescriptor) {
        let change = if descriptor == self.descriptor {
            CountChange::Recount
        } else {
            CountChange::FilterChange
        };
        self.descriptor = descriptor;
        self.refresh(change);
    }

    /// Applies a descriptor tagged with a caller-assigned version.
    ///
    /// Versions must increase. A descriptor whose version is not newer than
    /// the last applied one is stale: it is discarded and `false` is
    /// returned.
    pub fn apply_versioned(&mut self, version: u64, descriptor: QueryDescriptor) -> bool {
        if self.version.is_some_and(|current| version <= current) {
            return false;
        }
        self.version = Some(version);
        self.apply(descriptor);
        true
    }

    /// Replaces the source records, keeping the descriptor and the page
    /// (clamped).
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refresh(CountChange::Recount);
    }

    fn refresh(&mut self, change: CountChange) {
        self.results =
            self.engine
                .evaluate_indices(&self.records, &self.descriptor, &self.search_fields);
        self.cursor.set_total_items(self.results.len(), change);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        self.cursor.next()
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        self.cursor.previous()
    }

    /// Jumps to a page, rejecting pages out of range.
    pub fn go_to(&mut self, page: usize) -> Result<()> {
        self.cursor.go_to(page)
    }

    /// Changes the page size, rejecting zero.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.cursor.set_page_size(page_size)
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Returns the records on the current page.
    pub fn page(&self) -> Vec<&T> {
        self.cursor
            .page_of(&self.results)
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Returns every record matching the current descriptor, in result order.
    pub fn results(&self) -> Vec<&T> {
        self.results.iter().map(|&i| &self.records[i]).collect()
    }

    /// Returns the number of matching records.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Returns the "showing X of Y" summary for the current page.
    pub fn summary(&self) -> ResultSummary {
        ResultSummary::new(
            self.cursor.page_of(&self.results).len(),
            self.results.len(),
            self.descriptor.search_term(),
        )
    }

    /// Returns the source records.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Returns the search fields.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Returns the current descriptor.
    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Returns the last applied version, if any descriptor was versioned.
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowseError;
    use serde_json::{json, Value as Json};

    fn numbered(count: usize) -> Vec<Json> {
        (1..=count)
            .map(|n| {
                json!({
                    "title": format!("Item {n:02}"),
                    "price": n,
                    "category": if n % 2 == 0 { "even" } else { "odd" },
                })
            })
            .collect()
    }

    fn titles(records: &[&Json]) -> Vec<String> {
        records
            .iter()
            .map(|r| r["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn new_session_shows_first_page() {
        let session = BrowseSession::new(numbered(23), ["title"]);

        assert_eq!(session.result_count(), 23);
        assert_eq!(session.cursor().total_pages(), 3);
        assert_eq!(session.page().len(), 10);
        assert_eq!(session.summary().to_string(), "Showing 10 of 23 results");
    }

    #[test]
    fn navigation_moves_window() {
        let mut session = BrowseSession::new(numbered(23), ["title"]);

        assert!(session.next_page());
        assert!(session.next_page());
        assert!(!session.next_page());
        assert_eq!(titles(&session.page()), ["Item 21", "Item 22", "Item 23"]);
        assert_eq!(session.summary().shown, 3);

        assert!(session.previous_page());
        assert_eq!(session.cursor().page_index(), 2);
    }

    #[test]
    fn new_filter_resets_page() {
        let mut session = BrowseSession::new(numbered(23), ["title"]);
        session.go_to(3).unwrap();

        session.apply(QueryDescriptor::new().category("even"));
        assert_eq!(session.cursor().page_index(), 1);
        assert_eq!(session.result_count(), 11);
    }

    #[test]
    fn same_descriptor_keeps_page() {
        let mut session = BrowseSession::new(numbered(23), ["title"]);
        session.go_to(2).unwrap();

        session.apply(QueryDescriptor::new());
        assert_eq!(session.cursor().page_index(), 2);
    }

    #[test]
    fn replace_records_recounts() {
        let mut session = BrowseSession::new(numbered(23), ["title"]);
        session.go_to(3).unwrap();

        session.replace_records(numbered(25));
        assert_eq!(session.cursor().page_index(), 3);

        session.replace_records(numbered(12));
        assert_eq!(session.cursor().page_index(), 2);
        assert_eq!(titles(&session.page()), ["Item 11", "Item 12"]);
    }

    #[test]
    fn stale_versions_are_discarded() {
        let mut session = BrowseSession::new(numbered(23), ["title"]);

        assert!(session.apply_versioned(2, QueryDescriptor::new().search("item 1")));
        assert!(!session.apply_versioned(1, QueryDescriptor::new().search("item 2")));
        assert!(!session.apply_versioned(2, QueryDescriptor::new()));

        assert_eq!(session.version(), Some(2));
        assert_eq!(session.descriptor().search_term(), "item 1");
        assert_eq!(session.result_count(), 10);
    }

    #[test]
    fn sorted_results_page_in_order() {
        let mut session = BrowseSession::new(numbered(23), ["title"])
            .with_page_size(5)
            .unwrap();
        session.apply(QueryDescriptor::new().sort_desc("price"));

        assert_eq!(
            titles(&session.page()),
            ["Item 23", "Item 22", "Item 21", "Item 20", "Item 19"]
        );
        assert_eq!(session.cursor().total_pages(), 5);
    }

    #[test]
    fn empty_results_still_one_page() {
        let mut session = BrowseSession::new(numbered(5), ["title"]);
        session.apply(QueryDescriptor::new().search("nothing"));

        assert_eq!(session.result_count(), 0);
        assert_eq!(session.cursor().total_pages(), 1);
        assert_eq!(session.cursor().page_index(), 1);
        assert!(session.page().is_empty());
        assert_eq!(
            session.summary().to_string(),
            "Showing 0 of 0 results for \"nothing\""
        );
    }

    #[test]
    fn invalid_page_size_rejected() {
        let mut session = BrowseSession::new(numbered(5), ["title"]);

        assert!(matches!(
            session.set_page_size(0),
            Err(BrowseError::InvalidPageSize { .. })
        ));
        assert!(BrowseSession::new(numbered(5), ["title"]).with_page_size(0).is_err());
        assert_eq!(session.cursor().page_size(), 10);
    }
}
