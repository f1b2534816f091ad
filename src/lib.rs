//! Annotation-driven URL query encoding with serde
//!
//! This crate turns a value into URL query "values": a multi-map from keys
//! to lists of strings, which then encodes to a canonical query string.
//!
//! What gets emitted for a struct is controlled by the serde name of each
//! field, which doubles as an annotation of the form
//! `name,option,option:argument`:
//!
//! | option | effect |
//! |---|---|
//! | `-` (as the whole name) | the field is never emitted |
//! | `omitempty` | skip `null`, `false`, zero, empty strings, sequences and maps, and the zero timestamp |
//! | `int` | booleans become `1` / `0` |
//! | `unix`, `unixmilli`, `unixnano` | timestamps become epoch counts |
//! | `time_format:<layout>` | timestamps use a chrono `strftime` layout (`layout:` is an alias) |
//! | `del:<token>` | sequences are joined with `token`; `comma`, `space`, `semicolon` and `brackets` are named shortcuts |
//! | `inline` | with an empty name, a nested struct's fields are merged into the parent |
//!
//! Nested structs and maps produce bracketed keys such as `user[name]`.
//!
//! ## Supported Types
//!
//! At the **top level** the input may be a struct, a map, a sequence of
//! key/value pairs, a pre-encoded query string, or `None`/`()`, which
//! produce no values. Anything else, e.g. a bare number, is rejected with
//! [`Error::UnsupportedKind`].
//!
//! ## Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use query_values::Timestamp;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Page {
//!     #[serde(rename = "size")]
//!     size: u32,
//!     #[serde(rename = "sort,del:comma")]
//!     sort: Vec<&'static str>,
//! }
//!
//! #[derive(Serialize)]
//! struct Search {
//!     #[serde(rename = "q")]
//!     query: String,
//!     #[serde(rename = "cursor,omitempty")]
//!     cursor: Option<String>,
//!     #[serde(rename = "archived,int")]
//!     archived: bool,
//!     #[serde(rename = "since,unix")]
//!     since: Timestamp,
//!     #[serde(rename = ",inline")]
//!     page: Page,
//! }
//!
//! let search = Search {
//!     query: "rust serde".to_owned(),
//!     cursor: None,
//!     archived: false,
//!     since: Utc.with_ymd_and_hms(2011, 11, 11, 11, 11, 11).unwrap().into(),
//!     page: Page { size: 20, sort: vec!["name", "-age"] },
//! };
//!
//! let values = query_values::to_values(&search).unwrap();
//! assert_eq!(values.get("since"), Some("1321009871"));
//! assert_eq!(values.get("sort"), Some("name,-age"));
//!
//! assert_eq!(
//!     values.encode(),
//!     "archived=0&q=rust+serde&since=1321009871&size=20&sort=name%2C-age"
//! );
//! ```

pub mod annotation;
mod config;
mod error;
pub mod helpers;
mod map;
mod parse;
mod ser;
mod time;
mod values;

#[doc(inline)]
pub use annotation::{Annotation, TagOptions};
pub use config::Config;
pub use error::{Error, Result};
#[doc(inline)]
pub use ser::{append_query, to_string, to_values};
pub use time::Timestamp;
pub use values::QueryValues;
