//! Classification of serializable input.
//!
//! [`NodeSerializer`] runs the input's `Serialize` implementation once and
//! records the shape it reports as a [`Node`]. References, boxes, smart
//! pointers, `Some` and newtype structs are transparent, so the encoder
//! only ever looks at the unwrapped value; `None` and `()` become
//! [`Node::Null`].
//!
//! Structs with `#[serde(flatten)]` fields are written by serde as maps of
//! unknown length. Those become [`Node::Record`]s like any other struct, so
//! the flattened fields keep their annotations.

use std::borrow::Cow;

use serde::ser::{self, Serialize};

use crate::error::{Error, Result};
use crate::time::{self, Timestamp};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Int(i128),
    Uint(u128),
    /// A `u8`, kept apart so that a root `Vec<u8>` can be read as bytes.
    Byte(u8),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    Time(Timestamp),
    Seq(Vec<Node>),
    Map(Vec<(Node, Node)>),
    Record(Vec<Field>),
}

/// A struct field. The key is the field's serde name, which carries the
/// field's annotation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Field {
    pub key: Cow<'static, str>,
    pub value: Node,
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Uint(_) | Node::Byte(_) => "uint",
            Node::F32(_) | Node::F64(_) => "float",
            Node::Str(_) => "string",
            Node::Bytes(_) => "bytes",
            Node::Time(_) => "timestamp",
            Node::Seq(_) => "sequence",
            Node::Map(_) => "map",
            Node::Record(_) => "struct",
        }
    }

    /// Wraps `value` in a single-field record keyed by an enum variant.
    fn variant(variant: &'static str, value: Node) -> Node {
        Node::Record(vec![Field {
            key: Cow::Borrowed(variant),
            value,
        }])
    }

    /// The bytes of a non-empty sequence made only of `u8`s.
    pub fn as_bytes(items: &[Node]) -> Option<Vec<u8>> {
        if items.is_empty() {
            return None;
        }
        items
            .iter()
            .map(|item| match item {
                Node::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

/// Serializes any value into a [`Node`].
///
/// Every sequence, map, struct or non-unit enum variant opens one level of
/// nesting; opening a level deeper than `max_depth` fails with
/// [`Error::MaxDepthExceeded`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeSerializer {
    depth: usize,
    max_depth: usize,
    human_readable: bool,
}

impl NodeSerializer {
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
            human_readable: true,
        }
    }

    /// Checks that a container may be opened here and returns the
    /// serializer for its contents.
    fn nested(self) -> Result<Self> {
        if self.depth > self.max_depth {
            tracing::debug!(max_depth = self.max_depth, "input nested too deeply");
            return Err(Error::MaxDepthExceeded(self.max_depth));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = Error;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::Int(v.into()))
    }

    fn serialize_i128(self, v: i128) -> Result<Node> {
        Ok(Node::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::Byte(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::Uint(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::Uint(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        Ok(Node::Uint(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Node> {
        Ok(Node::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::Str(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Node> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::Str(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Node> {
        if name != time::TOKEN {
            return value.serialize(self);
        }

        // a timestamp writes its exact parts when not asked for text
        let parts = value.serialize(Self {
            human_readable: false,
            ..self
        })?;
        match timestamp_from_parts(&parts) {
            Some(timestamp) => Ok(Node::Time(timestamp)),
            None => {
                tracing::debug!(?parts, "unrecognised timestamp content");
                Ok(parts)
            }
        }
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node> {
        let inner = value.serialize(self.nested()?)?;
        Ok(Node::variant(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(self.nested()?, len.unwrap_or_default(), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(self.nested()?, len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(self.nested()?, len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(self.nested()?, len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder {
            ser: self.nested()?,
            entries: Vec::with_capacity(len.unwrap_or_default()),
            key: None,
            // serde derives a map of unknown length for `#[serde(flatten)]`
            flattened: len.is_none(),
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<RecordBuilder> {
        Ok(RecordBuilder::new(self.nested()?, len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder> {
        Ok(RecordBuilder::new(self.nested()?, len, Some(variant)))
    }

    fn is_human_readable(&self) -> bool {
        self.human_readable
    }
}

fn timestamp_from_parts(parts: &Node) -> Option<Timestamp> {
    let Node::Seq(items) = parts else {
        return None;
    };
    let int = |node: &Node| match node {
        Node::Int(v) => i64::try_from(*v).ok(),
        Node::Uint(v) => i64::try_from(*v).ok(),
        Node::Byte(v) => Some(i64::from(*v)),
        _ => None,
    };
    match items.as_slice() {
        [secs, nanos, offset] => Timestamp::from_parts(
            int(secs)?,
            u32::try_from(int(nanos)?).ok()?,
            i32::try_from(int(offset)?).ok()?,
        ),
        _ => None,
    }
}

pub(crate) struct SeqBuilder {
    ser: NodeSerializer,
    items: Vec<Node>,
    variant: Option<&'static str>,
}

impl SeqBuilder {
    fn new(ser: NodeSerializer, len: usize, variant: Option<&'static str>) -> Self {
        Self {
            ser,
            items: Vec::with_capacity(len),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn finish(self) -> Node {
        let seq = Node::Seq(self.items);
        match self.variant {
            Some(variant) => Node::variant(variant, seq),
            None => seq,
        }
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

pub(crate) struct MapBuilder {
    ser: NodeSerializer,
    entries: Vec<(Node, Node)>,
    key: Option<Node>,
    flattened: bool,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = Some(key.serialize(self.ser)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let Some(key) = self.key.take() else {
            return Err(Error::Custom(
                "internal error: map value serialized before its key".to_string(),
            ));
        };
        self.entries.push((key, value.serialize(self.ser)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        let all_named = self
            .entries
            .iter()
            .all(|(key, _)| matches!(key, Node::Str(_)));
        if !(self.flattened && all_named) {
            return Ok(Node::Map(self.entries));
        }

        tracing::trace!(fields = self.entries.len(), "reading flattened struct");
        let fields = self
            .entries
            .into_iter()
            .filter_map(|(key, value)| match key {
                Node::Str(key) => Some(Field {
                    key: Cow::Owned(key),
                    value,
                }),
                _ => None,
            })
            .collect();
        Ok(Node::Record(fields))
    }
}

pub(crate) struct RecordBuilder {
    ser: NodeSerializer,
    fields: Vec<Field>,
    variant: Option<&'static str>,
}

impl RecordBuilder {
    fn new(ser: NodeSerializer, len: usize, variant: Option<&'static str>) -> Self {
        Self {
            ser,
            fields: Vec::with_capacity(len),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let value = value.serialize(self.ser)?;
        self.fields.push(Field {
            key: Cow::Borrowed(key),
            value,
        });
        Ok(())
    }

    fn finish(self) -> Node {
        let record = Node::Record(self.fields);
        match self.variant {
            Some(variant) => Node::variant(variant, record),
            None => record,
        }
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.push(key, value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        tracing::trace!(field = key, "field skipped by serde");
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.push(key, value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}
