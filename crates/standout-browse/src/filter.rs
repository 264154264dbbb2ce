//! Attribute filter strategies.
//!
//! A filter control (category, level, status) is bound to a strategy that
//! decides how the control's value is checked against a record:
//!
//! | Strategy | Matches when |
//! |----------|--------------|
//! | [`AttributeFilter::Exact`] | the attribute equals the value |
//! | [`AttributeFilter::Fallback`] | any listed attribute equals the value |
//! | [`AttributeFilter::DerivedBoolean`] | the mapped boolean attribute holds the expected value |
//!
//! [`FieldMap`] binds one strategy per control and names the numeric
//! attribute the range filter reads. New record kinds register their own
//! bindings instead of changing the engine.

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// How one filter control is matched against a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeFilter {
    /// String equality against a single attribute.
    Exact { attribute: String },
    /// String equality against any of several attributes, in order.
    Fallback { attributes: Vec<String> },
    /// Logical name mapped to a boolean attribute check.
    ///
    /// Names without a mapping impose no constraint.
    DerivedBoolean { mappings: Vec<StatusMapping> },
}

/// One entry of a [`AttributeFilter::DerivedBoolean`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    /// Logical status name, as it appears in the filter control.
    pub name: String,
    /// Boolean attribute checked on the record.
    pub attribute: String,
    /// Value the attribute must hold.
    pub expected: bool,
}

impl StatusMapping {
    /// Creates a mapping from a status name to an attribute check.
    pub fn new(name: impl Into<String>, attribute: impl Into<String>, expected: bool) -> Self {
        StatusMapping {
            name: name.into(),
            attribute: attribute.into(),
            expected,
        }
    }
}

impl AttributeFilter {
    /// Creates an exact-match strategy.
    pub fn exact(attribute: impl Into<String>) -> Self {
        AttributeFilter::Exact {
            attribute: attribute.into(),
        }
    }

    /// Creates a fallback strategy over the given attributes.
    pub fn fallback<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeFilter::Fallback {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a derived-boolean strategy from a mapping table.
    pub fn derived(mappings: impl IntoIterator<Item = StatusMapping>) -> Self {
        AttributeFilter::DerivedBoolean {
            mappings: mappings.into_iter().collect(),
        }
    }

    /// Tests a record against the control value `wanted`.
    ///
    /// Absent attributes never match an `Exact` or `Fallback` strategy.
    pub fn matches<T: Record + ?Sized>(&self, record: &T, wanted: &str) -> bool {
        match self {
            AttributeFilter::Exact { attribute } => string_eq(&record.field(attribute), wanted),
            AttributeFilter::Fallback { attributes } => attributes
                .iter()
                .any(|attribute| string_eq(&record.field(attribute), wanted)),
            AttributeFilter::DerivedBoolean { mappings } => {
                match mappings.iter().find(|m| m.name == wanted) {
                    Some(m) => record.field(&m.attribute).as_bool() == Some(m.expected),
                    None => true,
                }
            }
        }
    }

    /// Registers an extra status mapping.
    ///
    /// A mapping with the same name replaces the old one. Non-derived
    /// strategies are returned unchanged.
    pub fn with_mapping(self, mapping: StatusMapping) -> Self {
        match self {
            AttributeFilter::DerivedBoolean { mut mappings } => {
                mappings.retain(|m| m.name != mapping.name);
                mappings.push(mapping);
                AttributeFilter::DerivedBoolean { mappings }
            }
            other => other,
        }
    }
}

fn string_eq(value: &Value<'_>, wanted: &str) -> bool {
    value.as_str() == Some(wanted)
}

/// Inclusive numeric bound for the range filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl PriceRange {
    /// Creates a range. `min > max` is allowed and matches no number.
    pub fn new(min: f64, max: f64) -> Self {
        PriceRange { min, max }
    }

    /// Tests an attribute value against the range.
    ///
    /// Non-numeric values (absent, null, strings, booleans) are exempt and
    /// always pass. NaN is not within any range.
    pub fn admits(&self, value: &Value<'_>) -> bool {
        match value.as_number() {
            Some(n) => {
                let v = n.to_f64();
                self.min <= v && v <= self.max
            }
            None => true,
        }
    }
}

/// Binds the descriptor's filter controls to strategies.
///
/// The default reproduces the stock behaviour:
///
/// - category: `category`, falling back to `type`
/// - level: exact match on `level`
/// - status: `published`/`draft` on `isPublished`, `active`/`inactive` on `isActive`
/// - range: the `price` attribute
///
/// # Example
///
/// ```
/// use standout_browse::{AttributeFilter, FieldMap, StatusMapping};
///
/// let fields = FieldMap::default()
///     .with_level(AttributeFilter::exact("difficulty"))
///     .with_status(StatusMapping::new("archived", "isArchived", true))
///     .with_range_attribute("cost");
/// assert_eq!(fields.range_attribute(), "cost");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    category: AttributeFilter,
    level: AttributeFilter,
    status: AttributeFilter,
    range_attribute: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        FieldMap {
            category: AttributeFilter::fallback(["category", "type"]),
            level: AttributeFilter::exact("level"),
            status: AttributeFilter::derived([
                StatusMapping::new("published", "isPublished", true),
                StatusMapping::new("draft", "isPublished", false),
                StatusMapping::new("active", "isActive", true),
                StatusMapping::new("inactive", "isActive", false),
            ]),
            range_attribute: "price".to_string(),
        }
    }
}

impl FieldMap {
    /// Creates the default field map.
    pub fn new() -> Self {
        FieldMap::default()
    }

    /// Replaces the category strategy.
    pub fn with_category(mut self, filter: AttributeFilter) -> Self {
        self.category = filter;
        self
    }

    /// Replaces the level strategy.
    pub fn with_level(mut self, filter: AttributeFilter) -> Self {
        self.level = filter;
        self
    }

    /// Replaces the status strategy.
    pub fn with_status_filter(mut self, filter: AttributeFilter) -> Self {
        self.status = filter;
        self
    }

    /// Registers an extra status name on the status strategy.
    pub fn with_status(mut self, mapping: StatusMapping) -> Self {
        self.status = self.status.with_mapping(mapping);
        self
    }

    /// Sets the attribute the range filter reads.
    pub fn with_range_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.range_attribute = attribute.into();
        self
    }

    /// Returns the category strategy.
    pub fn category(&self) -> &AttributeFilter {
        &self.category
    }

    /// Returns the level strategy.
    pub fn level(&self) -> &AttributeFilter {
        &self.level
    }

    /// Returns the status strategy.
    pub fn status(&self) -> &AttributeFilter {
        &self.status
    }

    /// Returns the attribute the range filter reads.
    pub fn range_attribute(&self) -> &str {
        &self.range_attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_requires_present_string() {
        let filter = AttributeFilter::exact("level");

        assert!(filter.matches(&json!({ "level": "beginner" }), "beginner"));
        assert!(!filter.matches(&json!({ "level": "advanced" }), "beginner"));
        assert!(!filter.matches(&json!({ "level": null }), "beginner"));
        assert!(!filter.matches(&json!({}), "beginner"));
        assert!(!filter.matches(&json!({ "level": 1 }), "1"));
    }

    #[test]
    fn fallback_checks_each_attribute() {
        let filter = AttributeFilter::fallback(["category", "type"]);

        assert!(filter.matches(&json!({ "category": "web" }), "web"));
        assert!(filter.matches(&json!({ "type": "web" }), "web"));
        assert!(filter.matches(&json!({ "category": "data", "type": "web" }), "web"));
        assert!(!filter.matches(&json!({ "kind": "web" }), "web"));
    }

    #[test]
    fn derived_boolean_default_table() {
        let fields = FieldMap::default();
        let status = fields.status();
        let published = json!({ "isPublished": true });
        let draft = json!({ "isPublished": false });
        let user = json!({ "isActive": false });

        assert!(status.matches(&published, "published"));
        assert!(!status.matches(&draft, "published"));
        assert!(status.matches(&draft, "draft"));
        assert!(status.matches(&user, "inactive"));
        assert!(!status.matches(&user, "active"));
        // Attribute missing: a mapped status cannot hold.
        assert!(!status.matches(&user, "draft"));
    }

    #[test]
    fn derived_boolean_unknown_name_keeps_all() {
        let status = FieldMap::default().status().clone();
        assert!(status.matches(&json!({}), "archived"));
        assert!(status.matches(&json!({ "isPublished": false }), "whatever"));
    }

    #[test]
    fn registered_status_mapping() {
        let fields = FieldMap::default()
            .with_status(StatusMapping::new("archived", "isArchived", true))
            .with_status(StatusMapping::new("published", "isLive", true));
        let status = fields.status();

        assert!(status.matches(&json!({ "isArchived": true }), "archived"));
        assert!(!status.matches(&json!({ "isArchived": false }), "archived"));
        // Replaced mapping.
        assert!(status.matches(&json!({ "isLive": true }), "published"));
        assert!(!status.matches(&json!({ "isPublished": true }), "published"));
    }

    #[test]
    fn with_mapping_ignored_on_other_strategies() {
        let exact = AttributeFilter::exact("level");
        let unchanged = exact
            .clone()
            .with_mapping(StatusMapping::new("x", "y", true));
        assert_eq!(exact, unchanged);
    }

    #[test]
    fn range_is_inclusive_and_exempts_non_numbers() {
        let range = PriceRange::new(10.0, 100.0);

        assert!(range.admits(&Value::Number(10i64.into())));
        assert!(range.admits(&Value::Number(100.0.into())));
        assert!(range.admits(&Value::Number(50u32.into())));
        assert!(!range.admits(&Value::Number(0i64.into())));
        assert!(!range.admits(&Value::Number(100.5.into())));
        assert!(!range.admits(&Value::Number(f64::NAN.into())));

        assert!(range.admits(&Value::None));
        assert!(range.admits(&Value::String("free")));
        assert!(range.admits(&Value::Bool(true)));
    }

    #[test]
    fn inverted_range_admits_only_exempt() {
        let range = PriceRange::new(100.0, 10.0);
        assert!(!range.admits(&Value::Number(50i64.into())));
        assert!(range.admits(&Value::None));
    }

    #[test]
    fn field_map_builders() {
        let fields = FieldMap::new()
            .with_category(AttributeFilter::exact("genre"))
            .with_level(AttributeFilter::exact("grade"))
            .with_range_attribute("cost");

        assert_eq!(fields.category(), &AttributeFilter::exact("genre"));
        assert_eq!(fields.level(), &AttributeFilter::exact("grade"));
        assert_eq!(fields.range_attribute(), "cost");
    }
}
