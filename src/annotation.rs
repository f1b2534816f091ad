//! Per-field annotations.
//!
//! A struct field's serde key doubles as its annotation, so a field is
//! configured with `#[serde(rename = "...")]`:
//!
//! ```
//! use query_values::Annotation;
//!
//! let annotation = Annotation::parse("created,omitempty,time_format:%Y-%m-%d %H:%M");
//! assert_eq!(annotation.name(), "created");
//! assert!(annotation.options().contains("omitempty"));
//! assert_eq!(annotation.options().get("time_format"), "%Y-%m-%d %H:%M");
//! ```

use std::collections::BTreeMap;

/// Name segment that excludes a field from encoding.
pub const SKIP: &str = "-";

pub const OMITEMPTY: &str = "omitempty";
pub const INT: &str = "int";
pub const UNIX: &str = "unix";
pub const UNIXMILLI: &str = "unixmilli";
pub const UNIXNANO: &str = "unixnano";
pub const INLINE: &str = "inline";
pub const DEL: &str = "del";
pub const TIME_FORMAT: &str = "time_format";
/// Alias of [`TIME_FORMAT`].
pub const LAYOUT: &str = "layout";

/// The options following the name in an annotation.
///
/// Each option is a key with an optional argument (`del:comma` has the key
/// `del` and the argument `comma`). Options without an argument map to the
/// empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagOptions<'a> {
    inner: BTreeMap<&'a str, &'a str>,
}

impl<'a> TagOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the option is present, with or without an argument.
    pub fn contains(&self, option: &str) -> bool {
        self.inner.contains_key(option)
    }

    /// Returns the option's argument, or the empty string when the option
    /// is absent or has no argument.
    pub fn get(&self, option: &str) -> &'a str {
        self.inner.get(option).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, option: &'a str, argument: &'a str) {
        self.inner.insert(option, argument);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.inner.iter().map(|(k, v)| (*k, *v))
    }

    /// The explicit timestamp layout, if any.
    pub(crate) fn time_format(&self) -> &'a str {
        match self.get(TIME_FORMAT) {
            "" => self.get(LAYOUT),
            layout => layout,
        }
    }
}

/// A parsed field annotation: an optional key name followed by options.
///
/// serde hands the encoder only the serialized name of a field, never its
/// declared identifier. An annotation with an empty name such as
/// `",omitempty"` therefore encodes under an empty key, and a `debug`
/// event is emitted for the field. With `inline` an empty name flattens
/// the field into its parent instead. Write the name out (`"page,omitempty"`)
/// to keep it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation<'a> {
    name: &'a str,
    options: TagOptions<'a>,
    skipped: bool,
}

impl<'a> Annotation<'a> {
    /// Parses `name,opt,opt:arg,...`.
    ///
    /// Empty option segments are ignored and an argument keeps any further
    /// `:` it contains. A repeated option overwrites the earlier one.
    pub fn parse(tag: &'a str) -> Self {
        let mut segments = tag.split(',');
        let name = segments.next().unwrap_or_default();
        let mut options = TagOptions::new();
        for segment in segments.filter(|s| !s.is_empty()) {
            let (option, argument) = segment.split_once(':').unwrap_or((segment, ""));
            options.insert(option, argument);
        }
        Self {
            name,
            options,
            skipped: tag == SKIP,
        }
    }

    /// The explicit key name; empty when the annotation starts with `,`.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn options(&self) -> &TagOptions<'a> {
        &self.options
    }

    /// Whether the field is excluded from encoding altogether. Only the bare
    /// `-` skips; `-,` names a field `-`.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}
