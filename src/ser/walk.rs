//! The encoding strategies for records, maps and pair sequences.

use crate::annotation::{Annotation, DEL, INLINE, OMITEMPTY, TagOptions};
use crate::values::QueryValues;

use super::node::{Field, Node};
use super::stringify::stringify;

/// How the elements of a sequence field are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiter<'a> {
    /// One value per element under the field's key.
    Repeat,
    /// One value per element under `key[]`.
    Brackets,
    /// A single value with the elements joined by the token.
    Join(&'a str),
}

impl<'a> Delimiter<'a> {
    fn from_options(opts: &TagOptions<'a>) -> Self {
        match opts.get(DEL) {
            "" => Delimiter::Repeat,
            "comma" => Delimiter::Join(","),
            "space" => Delimiter::Join(" "),
            "semicolon" => Delimiter::Join(";"),
            "brackets" => Delimiter::Brackets,
            token => Delimiter::Join(token),
        }
    }
}

fn scoped(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_owned()
    } else {
        format!("{scope}[{name}]")
    }
}

/// Whether `omitempty` drops the value: `null`, `false`, zero, an empty
/// string, sequence or map, and the zero timestamp. Records are never
/// empty.
pub(crate) fn is_empty(node: &Node) -> bool {
    match node {
        Node::Null => true,
        Node::Bool(v) => !v,
        Node::Int(v) => *v == 0,
        Node::Uint(v) => *v == 0,
        Node::Byte(v) => *v == 0,
        Node::F32(v) => *v == 0.0,
        Node::F64(v) => *v == 0.0,
        Node::Str(s) => s.is_empty(),
        Node::Bytes(b) => b.is_empty(),
        Node::Time(t) => t.is_zero(),
        Node::Seq(items) => items.is_empty(),
        Node::Map(entries) => entries.is_empty(),
        Node::Record(_) => false,
    }
}

/// Adds every field of a record, prefixing keys with `scope`.
pub(crate) fn walk_record(values: &mut QueryValues, fields: &[Field], scope: &str) {
    for field in fields {
        let annotation = Annotation::parse(&field.key);
        if annotation.is_skipped() {
            tracing::trace!(field = %field.key, "skipping field");
            continue;
        }

        let name = annotation.name();
        let opts = annotation.options();
        let key = scoped(scope, name);
        if opts.contains(OMITEMPTY) && is_empty(&field.value) {
            tracing::trace!(key = %key, "omitting empty field");
            continue;
        }

        let flatten = name.is_empty() && opts.contains(INLINE);
        if name.is_empty() && !flatten {
            tracing::debug!(
                field = %field.key,
                key = %key,
                "annotation has no name, the declared field name is not available"
            );
        }
        walk_field(values, key, &field.value, opts, flatten.then_some(scope));
    }
}

/// Adds a single field value under `key`.
///
/// `inline_scope` is the enclosing scope when a nested record or map should
/// be merged into it instead of being nested under `key`.
fn walk_field(
    values: &mut QueryValues,
    key: String,
    node: &Node,
    opts: &TagOptions<'_>,
    inline_scope: Option<&str>,
) {
    match node {
        Node::Null => {
            tracing::trace!(key = %key, "skipping null field");
        }
        Node::Seq(items) if items.is_empty() => {}
        Node::Seq(items) => match Delimiter::from_options(opts) {
            Delimiter::Join(token) => {
                let joined = items
                    .iter()
                    .map(|item| stringify(item, opts))
                    .collect::<Vec<_>>()
                    .join(token);
                values.add(key, joined);
            }
            Delimiter::Brackets => {
                let key = format!("{key}[]");
                for item in items {
                    values.add(key.as_str(), stringify(item, opts));
                }
            }
            Delimiter::Repeat => {
                for item in items {
                    values.add(key.as_str(), stringify(item, opts));
                }
            }
        },
        Node::Record(fields) => {
            walk_record(values, fields, inline_scope.unwrap_or(&key));
        }
        Node::Map(entries) => {
            // map entries carry no annotations of their own
            let scope = inline_scope.unwrap_or(&key);
            let no_opts = TagOptions::new();
            for (entry_key, value) in entries {
                let entry_key = scoped(scope, &stringify(entry_key, &no_opts));
                walk_field(values, entry_key, value, &no_opts, None);
            }
        }
        Node::Time(_)
        | Node::Bool(_)
        | Node::Int(_)
        | Node::Uint(_)
        | Node::Byte(_)
        | Node::F32(_)
        | Node::F64(_)
        | Node::Str(_)
        | Node::Bytes(_) => {
            values.add(key, stringify(node, opts));
        }
    }
}

/// Adds the entries of a top-level map. Sequence values are spread over
/// repeated keys; anything else becomes a single value.
pub(crate) fn walk_map(values: &mut QueryValues, entries: &[(Node, Node)]) {
    let no_opts = TagOptions::new();
    for (key, value) in entries {
        let key = stringify(key, &no_opts);
        match value {
            Node::Seq(items) => {
                for item in items {
                    values.add(key.as_str(), stringify(item, &no_opts));
                }
            }
            _ => values.add(key, stringify(value, &no_opts)),
        }
    }
}

/// Adds the pairs of a top-level sequence.
///
/// A sequence made only of two-element tuples (`Vec<(K, V)>`) is read as a
/// list of pairs; any other sequence alternates keys and values, and a
/// trailing key without a value is dropped.
pub(crate) fn walk_pairs(values: &mut QueryValues, items: &[Node]) {
    let no_opts = TagOptions::new();
    let tuples = !items.is_empty()
        && items
            .iter()
            .all(|item| matches!(item, Node::Seq(pair) if pair.len() == 2));

    if tuples {
        for item in items {
            if let Node::Seq(pair) = item {
                if let [key, value] = pair.as_slice() {
                    values.add(stringify(key, &no_opts), stringify(value, &no_opts));
                }
            }
        }
    } else {
        for pair in items.chunks_exact(2) {
            if let [key, value] = pair {
                values.add(stringify(key, &no_opts), stringify(value, &no_opts));
            }
        }
    }
}
