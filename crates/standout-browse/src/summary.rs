//! Display helpers: the result summary line and filter vocabularies.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::record::Record;

/// Summary of the current page, for a "showing X of Y" line.
///
/// ```
/// use standout_browse::ResultSummary;
///
/// let summary = ResultSummary::new(10, 23, "go");
/// assert_eq!(summary.to_string(), r#"Showing 10 of 23 results for "go""#);
///
/// let summary = ResultSummary::new(3, 3, "");
/// assert_eq!(summary.to_string(), "Showing 3 of 3 results");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    /// Records on the current page.
    pub shown: usize,
    /// Records matching the query.
    pub total: usize,
    /// Search term, empty when none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_term: String,
}

impl ResultSummary {
    /// Creates a summary.
    pub fn new(shown: usize, total: usize, search_term: impl Into<String>) -> Self {
        ResultSummary {
            shown,
            total,
            search_term: search_term.into(),
        }
    }
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} results", self.shown, self.total)?;
        if !self.search_term.is_empty() {
            write!(f, " for \"{}\"", self.search_term)?;
        }
        Ok(())
    }
}

/// Collects the distinct string values of an attribute, sorted.
///
/// Used to populate category and level controls from the data itself.
/// Records where the attribute is absent or not a string are skipped.
pub fn distinct_values<T: Record>(records: &[T], attribute: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.field(attribute).as_str().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
