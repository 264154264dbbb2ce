//! The [`Record`] trait: attribute access by name.
//!
//! The engine never sees concrete record types. Every stage reads attributes
//! through [`Record::field`], so typed structs, sum types over several record
//! kinds, and schema-less JSON objects can all be browsed with one engine.

use crate::value::{Number, Value};

/// Trait for types that can be searched, filtered and sorted.
///
/// Implement it with a `match` over the attribute names the record exposes.
/// Unknown names return [`Value::None`].
///
/// # Typed records
///
/// ```
/// use standout_browse::{Record, Value, Number};
///
/// struct Course {
///     title: String,
///     price: u32,
///     is_published: bool,
/// }
///
/// impl Record for Course {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "title" => Value::String(&self.title),
///             "price" => Value::Number(Number::U64(self.price as u64)),
///             "isPublished" => Value::Bool(self.is_published),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
///
/// # Heterogeneous collections
///
/// When several record kinds share one engine, wrap them in an enum and
/// delegate to each variant's table:
///
/// ```
/// use standout_browse::{Record, Value};
///
/// struct Course { category: String }
/// struct User { role: String }
///
/// enum Item {
///     Course(Course),
///     User(User),
/// }
///
/// impl Record for Item {
///     fn field(&self, name: &str) -> Value<'_> {
///         match (self, name) {
///             (Item::Course(c), "category") => Value::String(&c.category),
///             (Item::User(u), "type") => Value::String(&u.role),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of the named attribute.
    fn field(&self, name: &str) -> Value<'_>;

    /// Returns the attribute accessor as a plain function.
    ///
    /// Useful when an API takes an accessor closure instead of a `Record`.
    fn accessor<'a>(item: &'a Self, name: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field(name)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

/// Schema-less record: a JSON object.
///
/// Strings, numbers and booleans are queryable. `null`, arrays and nested
/// objects read as [`Value::None`].
impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, json_value)
    }
}

/// Any JSON value; only objects expose attributes.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => Value::None,
        }
    }
}

fn json_value(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => json_number(n).map_or(Value::None, Value::Number),
        _ => Value::None,
    }
}

fn json_number(n: &serde_json::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::U64(u))
    } else {
        n.as_f64().map(Number::F64)
    }
}
