//! Conversion of a single value to its query string form.

use std::fmt::Write;

use crate::annotation::{INT, TagOptions, UNIX, UNIXMILLI, UNIXNANO};
use crate::time::Timestamp;

use super::node::Node;

/// Returns the string form of `node` under the field's options.
///
/// Never fails: values without a dedicated rule fall back to a plain
/// rendering.
pub(crate) fn stringify(node: &Node, opts: &TagOptions<'_>) -> String {
    match node {
        Node::Null => String::new(),
        Node::Bool(v) => {
            let s = match (*v, opts.contains(INT)) {
                (true, true) => "1",
                (false, true) => "0",
                (true, false) => "true",
                (false, false) => "false",
            };
            s.to_owned()
        }
        Node::Int(v) => itoa::Buffer::new().format(*v).to_owned(),
        Node::Uint(v) => itoa::Buffer::new().format(*v).to_owned(),
        Node::Byte(v) => itoa::Buffer::new().format(*v).to_owned(),
        Node::F32(v) => ryu::Buffer::new().format(*v).to_owned(),
        Node::F64(v) => ryu::Buffer::new().format(*v).to_owned(),
        Node::Str(s) => s.clone(),
        Node::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Node::Time(t) => stringify_time(t, opts),
        Node::Seq(items) => {
            let mut out = String::from("[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&stringify(item, opts));
            }
            out.push(']');
            out
        }
        Node::Record(fields) => {
            let mut out = String::from("{");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&stringify(&field.value, opts));
            }
            out.push('}');
            out
        }
        Node::Map(entries) => {
            let mut out = String::from("{");
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&stringify(key, opts));
                out.push(':');
                out.push_str(&stringify(value, opts));
            }
            out.push('}');
            out
        }
    }
}

/// `unix`, `unixmilli` and `unixnano` take precedence over `time_format`,
/// which takes precedence over RFC 3339.
fn stringify_time(t: &Timestamp, opts: &TagOptions<'_>) -> String {
    if t.is_zero() {
        return String::new();
    }
    if opts.contains(UNIX) {
        return itoa::Buffer::new().format(t.unix()).to_owned();
    }
    if opts.contains(UNIXMILLI) {
        return itoa::Buffer::new().format(t.unix_millis()).to_owned();
    }
    if opts.contains(UNIXNANO) {
        return itoa::Buffer::new().format(t.unix_nanos()).to_owned();
    }

    let layout = opts.time_format();
    if !layout.is_empty() {
        let mut out = String::new();
        // an invalid layout surfaces as a formatting error
        if write!(out, "{}", t.as_datetime().format(layout)).is_ok() {
            return out;
        }
        tracing::debug!(layout, "invalid time layout, falling back to RFC 3339");
    }
    t.to_rfc3339()
}
