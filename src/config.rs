use serde::ser::Serialize;

use crate::error::Result;
use crate::values::QueryValues;

/// Configuration for encoding behavior.
///
/// ## Nesting Depth
///
/// The `max_depth` parameter bounds how deeply sequences, maps and structs
/// may be nested in the input. Exceeding it fails with
/// [`Error::MaxDepthExceeded`](crate::Error::MaxDepthExceeded) instead of
/// recursing without limit on self-referential or hostile data.
///
/// Default value: `max_depth = 64`
///
/// ```
/// use query_values::{Config, Error};
///
/// let nested = vec![vec![vec![("a", 1)]]];
/// let config = Config::new().max_depth(1);
/// assert!(matches!(
///     config.encode_values(&nested),
///     Err(Error::MaxDepthExceeded(1))
/// ));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) max_depth: usize,
    pub(crate) use_form_encoding: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_depth: 64,
            use_form_encoding: true,
        }
    }

    /// Specifies how deeply nested the input may be. Default is 64.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// By default the encoded string uses form encoding, where everything
    /// except ASCII letters, digits and `-._~` is percent-encoded and a
    /// space becomes `+`. Brackets in nested keys come out as `%5B`/`%5D`.
    ///
    /// Setting this to `false` switches to the more relaxed
    /// [WHATWG](https://url.spec.whatwg.org/#query-percent-encode-set)
    /// query set, which leaves characters like `[`, `]`, `:` and `,`
    /// readable.
    ///
    /// e.g. `{ "a[]": "1,2" }` is encoded as `a%5B%5D=1%2C2` with form
    /// encoding and as `a[]=1,2` without.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Builds the query values of `input` using this `Config`.
    pub fn encode_values<T: ?Sized + Serialize>(self, input: &T) -> Result<QueryValues> {
        crate::ser::encode_values(&self, input)
    }

    /// Serializes `input` to an encoded query string using this `Config`.
    pub fn encode_string<T: ?Sized + Serialize>(self, input: &T) -> Result<String> {
        let values = self.encode_values(input)?;
        Ok(values.encode_with(self.use_form_encoding))
    }

    /// Encodes `input` and appends it to `existing` using this `Config`.
    pub fn append_query<T: ?Sized + Serialize>(self, existing: &str, input: &T) -> Result<String> {
        let encoded = self.encode_string(input)?;
        Ok(match (existing.is_empty(), encoded.is_empty()) {
            (_, true) => existing.to_owned(),
            (true, false) => encoded,
            (false, false) => format!("{existing}&{encoded}"),
        })
    }
}
