//! Query descriptor: the declarative input of one evaluation.
//!
//! A [`QueryDescriptor`] is built fresh for every interaction (a keystroke, a
//! filter change) and never mutated once handed to the engine. Builder methods
//! consume and return `self`; there are no setters.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::filter::PriceRange;
use crate::ordering::{SortDirection, SortKey};

/// Search, filter and sort criteria for one evaluation.
///
/// The default descriptor matches every record and leaves input order alone.
///
/// # Example
///
/// ```
/// use standout_browse::QueryDescriptor;
///
/// let descriptor = QueryDescriptor::new()
///     .search("go")
///     .category("programming")
///     .status("published")
///     .price_range(10.0, 100.0)
///     .sort_desc("price");
///
/// assert_eq!(descriptor.active_filters(), 4);
/// ```
///
/// Descriptors also load from JSON with camelCase keys, all optional:
///
/// ```
/// use standout_browse::{QueryDescriptor, SortDirection};
///
/// let descriptor = QueryDescriptor::from_json(
///     r#"{"searchTerm": "rust", "rangeFilter": {"min": 0, "max": 50},
///         "sortKey": "title", "sortDirection": "desc"}"#,
/// ).unwrap();
///
/// assert_eq!(descriptor.search_term(), "rust");
/// assert_eq!(descriptor.sort_direction(), SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescriptor {
    #[serde(deserialize_with = "null_as_default")]
    search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_filter: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_key: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    sort_direction: SortDirection,
}

impl QueryDescriptor {
    /// Creates a descriptor that matches everything.
    pub fn new() -> Self {
        QueryDescriptor::default()
    }

    /// Parses a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Sets the category filter.
    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category_filter = Some(value.into());
        self
    }

    /// Sets the level filter.
    pub fn level(mut self, value: impl Into<String>) -> Self {
        self.level_filter = Some(value.into());
        self
    }

    /// Sets the status filter.
    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status_filter = Some(value.into());
        self
    }

    /// Sets the inclusive range filter.
    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.range_filter = Some(PriceRange::new(min, max));
        self
    }

    /// Sets the sort attribute and direction.
    pub fn sort_by(mut self, attribute: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(attribute.into());
        self.sort_direction = direction;
        self
    }

    /// Sorts ascending by the given attribute.
    pub fn sort_asc(self, attribute: impl Into<String>) -> Self {
        self.sort_by(attribute, SortDirection::Asc)
    }

    /// Sorts descending by the given attribute.
    pub fn sort_desc(self, attribute: impl Into<String>) -> Self {
        self.sort_by(attribute, SortDirection::Desc)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search term (possibly empty).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns `true` if a non-empty search term is set.
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Returns the category filter. Empty strings count as unset.
    pub fn category_filter(&self) -> Option<&str> {
        non_empty(&self.category_filter)
    }

    /// Returns the level filter. Empty strings count as unset.
    pub fn level_filter(&self) -> Option<&str> {
        non_empty(&self.level_filter)
    }

    /// Returns the status filter. Empty strings count as unset.
    pub fn status_filter(&self) -> Option<&str> {
        non_empty(&self.status_filter)
    }

    /// Returns the range filter.
    pub fn range_filter(&self) -> Option<PriceRange> {
        self.range_filter
    }

    /// Returns the sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Returns the sort key, if sorting is requested.
    pub fn sort(&self) -> Option<SortKey> {
        non_empty(&self.sort_key).map(|attribute| SortKey::new(attribute, self.sort_direction))
    }

    /// Counts the active predicates (search included, sort excluded).
    pub fn active_filters(&self) -> usize {
        [
            self.has_search(),
            self.category_filter().is_some(),
            self.level_filter().is_some(),
            self.status_filter().is_some(),
            self.range_filter.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Returns `true` if no predicate is active.
    pub fn is_unfiltered(&self) -> bool {
        self.active_filters() == 0
    }
}

// `null` reads like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
