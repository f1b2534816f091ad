//! Conversion of serializable values into [`QueryValues`].

pub(crate) mod encode;
mod node;
mod stringify;
mod walk;

use serde::ser::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::values::QueryValues;

use node::{Node, NodeSerializer};

/// Builds the query values of `input`.
///
/// Field names and options come from the serde name of each struct field,
/// written as `name,option,option:argument`:
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(rename = "index")]
///     index: Vec<u32>,
///     #[serde(rename = "token,omitempty")]
///     token: String,
///     #[serde(rename = "tags,del:comma")]
///     tags: Vec<&'static str>,
/// }
///
/// let q = Query {
///     index: vec![1, 2],
///     token: String::new(),
///     tags: vec!["a", "b"],
/// };
///
/// let values = query_values::to_values(&q).unwrap();
/// assert_eq!(values.get_all("index"), ["1", "2"]);
/// assert!(!values.contains_key("token"));
/// assert_eq!(values.get("tags"), Some("a,b"));
/// ```
pub fn to_values<T: ?Sized + Serialize>(input: &T) -> Result<QueryValues> {
    Config::default().encode_values(input)
}

/// Serializes a value into an encoded query string with sorted keys.
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     age: u8,
///     #[serde(rename = "-")]
///     secret: String,
/// }
///
/// let q = Query {
///     name: "Alice Smith".to_owned(),
///     age: 24,
///     secret: "hunter2".to_owned(),
/// };
///
/// assert_eq!(
///     query_values::to_string(&q).unwrap(),
///     "age=24&name=Alice+Smith"
/// );
/// ```
pub fn to_string<T: ?Sized + Serialize>(input: &T) -> Result<String> {
    Config::default().encode_string(input)
}

/// Encodes `input` and appends it to an existing query string.
///
/// The two parts are joined with `&` only when both are non-empty.
///
/// ```
/// let map = [("page", 2)].into_iter().collect::<std::collections::BTreeMap<_, _>>();
/// assert_eq!(query_values::append_query("q=rust", &map).unwrap(), "q=rust&page=2");
/// assert_eq!(query_values::append_query("", &map).unwrap(), "page=2");
/// ```
pub fn append_query<T: ?Sized + Serialize>(existing: &str, input: &T) -> Result<String> {
    Config::default().append_query(existing, input)
}

/// Picks the encoding strategy for the shape of `input`.
pub(crate) fn encode_values<T: ?Sized + Serialize>(
    config: &Config,
    input: &T,
) -> Result<QueryValues> {
    let node = input.serialize(NodeSerializer::new(config.max_depth))?;

    let mut values = QueryValues::new();
    match &node {
        Node::Null => {
            tracing::trace!("null input, no values");
        }
        Node::Str(query) => {
            tracing::trace!("parsing string input as a query");
            values = crate::parse::parse(query.as_bytes())?;
        }
        Node::Bytes(query) => {
            tracing::trace!("parsing byte input as a query");
            values = crate::parse::parse(query)?;
        }
        Node::Map(entries) => {
            tracing::trace!(entries = entries.len(), "encoding map input");
            walk::walk_map(&mut values, entries);
        }
        Node::Seq(items) => match Node::as_bytes(items) {
            Some(query) => {
                tracing::trace!("parsing byte sequence input as a query");
                values = crate::parse::parse(&query)?;
            }
            None => {
                tracing::trace!(items = items.len(), "encoding sequence input as pairs");
                walk::walk_pairs(&mut values, items);
            }
        },
        Node::Record(fields) => {
            tracing::trace!(fields = fields.len(), "encoding struct input");
            walk::walk_record(&mut values, fields, "");
        }
        Node::Bool(_)
        | Node::Int(_)
        | Node::Uint(_)
        | Node::Byte(_)
        | Node::F32(_)
        | Node::F64(_)
        | Node::Time(_) => {
            tracing::debug!(kind = node.kind(), "input has no key/value structure");
            return Err(Error::UnsupportedKind(node.kind()));
        }
    }
    Ok(values)
}
