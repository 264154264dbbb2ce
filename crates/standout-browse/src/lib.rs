//! Browse - filtered, sorted, paginated views over in-memory collections.
//!
//! Browse turns an unordered collection of records into the page a list
//! screen displays. It has two cooperating parts:
//!
//! - [`QueryEngine`]: a pure function of `(records, descriptor, search fields)`
//!   running text search, attribute filters, a range filter and a stable sort
//! - [`PageCursor`]: the current page over the engine's output, clamped to
//!   valid bounds after every operation
//!
//! [`BrowseSession`] wires the two together for the common case.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_browse::{evaluate, CountChange, PageCursor, QueryDescriptor, Record, Value, Number};
//!
//! struct Course {
//!     title: String,
//!     price: u32,
//! }
//!
//! impl Record for Course {
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "title" => Value::String(&self.title),
//!             "price" => Value::Number(Number::U64(self.price as u64)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let courses = vec![
//!     Course { title: "Intro to Go".into(), price: 0 },
//!     Course { title: "Advanced Go".into(), price: 50 },
//!     Course { title: "Rust Basics".into(), price: 30 },
//! ];
//!
//! let descriptor = QueryDescriptor::new().search("go").sort_desc("price");
//! let results = evaluate(&courses, &descriptor, &["title"]);
//! assert_eq!(results[0].title, "Advanced Go");
//!
//! let mut cursor = PageCursor::new(1).unwrap();
//! cursor.set_total_items(results.len(), CountChange::FilterChange);
//! cursor.next();
//! assert_eq!(cursor.page_of(&results)[0].title, "Intro to Go");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! text search → category → level → status → range → sort
//! ```
//!
//! | Stage | Keeps a record when | Missing attribute |
//! |-------|---------------------|-------------------|
//! | search | any search field contains the term, case-insensitively | that field does not match |
//! | category | `category` or `type` equals the value | excluded |
//! | level | `level` equals the value | excluded |
//! | status | the mapped boolean holds (`published`, `draft`, `active`, `inactive`) | excluded; unknown names keep all |
//! | range | `price` lies in `[min, max]` | exempt (kept) |
//!
//! Sorting compares strings in a case- and accent-insensitive order and
//! numbers numerically. Equal keys keep their input order, and records whose
//! value is missing or cannot be ordered keep their position. The attribute bindings are configurable through [`FieldMap`].

mod cursor;
mod descriptor;
mod engine;
mod error;
mod filter;
mod ordering;
mod record;
mod session;
mod summary;
mod value;

// Re-export public API
pub use cursor::{CountChange, PageCursor, PageInfo, DEFAULT_PAGE_SIZE};
pub use descriptor::QueryDescriptor;
pub use engine::{evaluate, QueryEngine};
pub use error::{BrowseError, Result};
pub use filter::{AttributeFilter, FieldMap, PriceRange, StatusMapping};
pub use ordering::{compare_values, locale_cmp, SortDirection, SortKey};
pub use record::Record;
pub use session::BrowseSession;
pub use summary::{distinct_values, ResultSummary};
pub use value::{Number, Value};
