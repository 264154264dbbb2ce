//! Ordering types for result sorting.
//!
//! Provides [`SortDirection`] and [`SortKey`], plus the value comparator the
//! engine sorts with.

use std::cmp::Ordering;
use std::str::FromStr;

use deunicode::deunicode;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BrowseError;
use crate::record::Record;
use crate::value::Value;

/// Sort direction.
///
/// Serializes as `"asc"`/`"desc"` and parses either case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortDirection {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, SortDirection::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// `Equal` stays `Equal` in both directions, which keeps descending sorts
    /// stable.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(BrowseError::UnknownSortDirection(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The attribute to sort by and the direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Attribute name.
    pub attribute: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates a sort key with the given direction.
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        SortKey {
            attribute: attribute.into(),
            direction,
        }
    }

    /// Creates an ascending sort key.
    pub fn asc(attribute: impl Into<String>) -> Self {
        SortKey::new(attribute, SortDirection::Asc)
    }

    /// Creates a descending sort key.
    pub fn desc(attribute: impl Into<String>) -> Self {
        SortKey::new(attribute, SortDirection::Desc)
    }

    /// Compares two records on this key, direction applied.
    pub fn compare<T: Record + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        let ordering = compare_values(&a.field(&self.attribute), &b.field(&self.attribute));
        self.direction.apply(ordering)
    }
}

/// Compares two attribute values.
///
/// Strings use [`locale_cmp`], numbers compare numerically. Everything else
/// (type mismatch, missing values, NaN, booleans) compares `Equal`.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => locale_cmp(a, b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Human-oriented string ordering.
///
/// Compares accent-folded, case-folded text first so `"apple" < "Banana"` and
/// `"école"` sorts beside `"ecole"`. Ties fall back to case-folded original
/// text, then to code points, so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Stably sorts `indices`, positions into `records`, by `key`.
///
/// Only values that order against each other move. Numbers are sorted among
/// the slots numbers held and strings among the slots strings held, so equal
/// keys keep input order. Missing, boolean and NaN values keep their slot.
pub(crate) fn sort_indices<T: Record>(indices: &mut [usize], records: &[T], key: &SortKey) {
    let mut numbers = Vec::new();
    let mut strings = Vec::new();
    for (slot, &index) in indices.iter().enumerate() {
        match records[index].field(&key.attribute) {
            Value::Number(n) if !n.to_f64().is_nan() => numbers.push(slot),
            Value::String(_) => strings.push(slot),
            _ => {}
        }
    }

    for slots in [numbers, strings] {
        let mut members: Vec<usize> = slots.iter().map(|&slot| indices[slot]).collect();
        members.sort_by(|&a, &b| key.compare(&records[a], &records[b]));
        for (slot, member) in slots.into_iter().zip(members) {
            indices[slot] = member;
        }
    }
}
