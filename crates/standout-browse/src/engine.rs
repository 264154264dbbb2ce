//! Query engine: search, filter and sort a record collection.
//!
//! Evaluation runs a fixed pipeline over the input:
//!
//! ```text
//! text search → category → level → status → range → sort
//! ```
//!
//! Each filter stage narrows the set left by the previous one. The engine is
//! stateless apart from its [`FieldMap`], reads its inputs without mutating
//! them, and never fails: a record missing an attribute simply fails that
//! stage (or is exempt, for the range stage).

use crate::descriptor::QueryDescriptor;
use crate::filter::{AttributeFilter, FieldMap, PriceRange};
use crate::ordering::sort_indices;
use crate::record::Record;

/// Evaluates a descriptor against records using the default [`FieldMap`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_browse::{evaluate, QueryDescriptor};
///
/// let records = vec![
///     json!({ "title": "Intro to Go", "price": 0 }),
///     json!({ "title": "Advanced Go", "price": 50 }),
///     json!({ "title": "Rust Basics", "price": 30 }),
/// ];
///
/// let descriptor = QueryDescriptor::new().search("go");
/// let results = evaluate(&records, &descriptor, &["title"]);
/// assert_eq!(results.len(), 2);
///
/// let descriptor = descriptor.price_range(10.0, 100.0);
/// let results = evaluate(&records, &descriptor, &["title"]);
/// assert_eq!(results, vec![&records[1]]);
/// ```
pub fn evaluate<'a, T, S>(
    records: &'a [T],
    descriptor: &QueryDescriptor,
    search_fields: &[S],
) -> Vec<&'a T>
where
    T: Record,
    S: AsRef<str>,
{
    QueryEngine::default().evaluate(records, descriptor, search_fields)
}

/// Evaluates [`QueryDescriptor`]s against record collections.
///
/// The engine holds only the [`FieldMap`] binding filter controls to
/// attributes; it can be shared and called concurrently.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    fields: FieldMap,
}

/// One stage of the filter pipeline, resolved against a descriptor.
enum Stage<'q> {
    Search {
        term: String,
        fields: Vec<&'q str>,
    },
    Attribute {
        filter: &'q AttributeFilter,
        wanted: &'q str,
    },
    Range {
        attribute: &'q str,
        range: PriceRange,
    },
}

impl Stage<'_> {
    fn admits<T: Record + ?Sized>(&self, record: &T) -> bool {
        match self {
            Stage::Search { term, fields } => fields.iter().any(|field| {
                record
                    .field(field)
                    .stringify()
                    .is_some_and(|text| !text.is_empty() && text.to_lowercase().contains(term))
            }),
            Stage::Attribute { filter, wanted } => filter.matches(record, wanted),
            Stage::Range { attribute, range } => range.admits(&record.field(attribute)),
        }
    }
}

impl QueryEngine {
    /// Creates an engine with the default field map.
    pub fn new() -> Self {
        QueryEngine::default()
    }

    /// Creates an engine with a custom field map.
    pub fn with_fields(fields: FieldMap) -> Self {
        QueryEngine { fields }
    }

    /// Returns the field map.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Resolves the active stages of a descriptor, in pipeline order.
    fn stages<'q, S: AsRef<str>>(
        &'q self,
        descriptor: &'q QueryDescriptor,
        search_fields: &'q [S],
    ) -> Vec<Stage<'q>> {
        let mut stages = Vec::new();

        if descriptor.has_search() {
            stages.push(Stage::Search {
                term: descriptor.search_term().to_lowercase(),
                fields: search_fields.iter().map(|field| field.as_ref()).collect(),
            });
        }

        let controls = [
            (self.fields.category(), descriptor.category_filter()),
            (self.fields.level(), descriptor.level_filter()),
            (self.fields.status(), descriptor.status_filter()),
        ];
        for (filter, wanted) in controls {
            if let Some(wanted) = wanted {
                stages.push(Stage::Attribute { filter, wanted });
            }
        }

        if let Some(range) = descriptor.range_filter() {
            stages.push(Stage::Range {
                attribute: self.fields.range_attribute(),
                range,
            });
        }

        stages
    }

    /// Tests whether a single record passes every filter stage.
    pub fn matches<T, S>(&self, record: &T, descriptor: &QueryDescriptor, search_fields: &[S]) -> bool
    where
        T: Record + ?Sized,
        S: AsRef<str>,
    {
        self.stages(descriptor, search_fields)
            .iter()
            .all(|stage| stage.admits(record))
    }

    /// Runs the pipeline and returns the input positions of the results, in
    /// result order.
    pub fn evaluate_indices<T, S>(
        &self,
        records: &[T],
        descriptor: &QueryDescriptor,
        search_fields: &[S],
    ) -> Vec<usize>
    where
        T: Record,
        S: AsRef<str>,
    {
        let mut kept: Vec<usize> = (0..records.len()).collect();

        for stage in self.stages(descriptor, search_fields) {
            kept.retain(|&i| stage.admits(&records[i]));
        }

        if let Some(key) = descriptor.sort() {
            sort_indices(&mut kept, records, &key);
        }

        kept
    }

    /// Runs the pipeline, returning references to matching records in
    /// result order.
    pub fn evaluate<'a, T, S>(
        &self,
        records: &'a [T],
        descriptor: &QueryDescriptor,
        search_fields: &[S],
    ) -> Vec<&'a T>
    where
        T: Record,
        S: AsRef<str>,
    {
        self.evaluate_indices(records, descriptor, search_fields)
            .into_iter()
            .map(|i| &records[i])
            .collect()
    }

    /// Runs the pipeline and clones the results.
    pub fn evaluate_cloned<T, S>(
        &self,
        records: &[T],
        descriptor: &QueryDescriptor,
        search_fields: &[S],
    ) -> Vec<T>
    where
        T: Record + Clone,
        S: AsRef<str>,
    {
        self.evaluate(records, descriptor, search_fields)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Counts matching records without sorting.
    pub fn count<T, S>(&self, records: &[T], descriptor: &QueryDescriptor, search_fields: &[S]) -> usize
    where
        T: Record,
        S: AsRef<str>,
    {
        let stages = self.stages(descriptor, search_fields);
        records
            .iter()
            .filter(|record| stages.iter().all(|stage| stage.admits(*record)))
            .count()
    }
}
