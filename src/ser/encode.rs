use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// As defined in https://url.spec.whatwg.org/#query-percent-encode-set
///
/// The set of characters that need to be encoded in a _query_ string
/// are:
/// - CONTROL characters
/// - SPACE (but we'll separately encode it as `+`)
/// - U+0022 ("), U+0023 (#), U+003C (<), and U+003E (>).
///
/// NOTE: we add our querystring-specific characters here
/// because the encode method is only every called on
/// keys and values. This means that we _do_ want them to
/// be percent-encoded here.
const MINIMAL_QS_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    // `+` is used to represent a space in query strings
    .add(b'+')
    // key, value separator
    .add(b'=')
    // denote key-value pairs
    .add(b'&')
    // literal percent signs would be decoded on the way back
    .add(b'%')
    // rejected as a separator when parsed
    .add(b';');

/// Everything but the URL "unreserved" characters: ASCII alphanumerics,
/// U+002D (-), U+002E (.), U+005F (_) and U+007E (~). SPACE is left out of
/// the set so that it can be written as `+`.
///
/// This is the conventional escaping for query components, and the one
/// the canonical sorted form of [`QueryValues`](crate::QueryValues) uses:
/// `a[b]=x y` becomes `a%5Bb%5D=x+y`.
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encodes bytes for use in a querystring, applying percent-encoding as needed.
///
/// In both modes spaces are written as `+`.
///
/// ## Form Encoding (default)
/// Escapes every byte outside the unreserved set, including brackets.
///
/// ## Minimal Encoding
/// Uses the WHATWG query percent-encode set plus the querystring
/// delimiters, which keeps nested keys like `a[b][c]` readable.
///
/// The function returns an iterator to avoid allocations when no encoding is needed.
pub fn encode(b: &[u8], use_form_encoding: bool) -> impl Iterator<Item = Cow<'_, [u8]>> + '_ {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        MINIMAL_QS_SET
    };
    percent_encoding::percent_encode(b, set).map(|s| {
        // neither set escapes SPACE, it is written as `+` instead
        if s.as_bytes().contains(&b' ') {
            Cow::Owned(
                s.as_bytes()
                    .iter()
                    .map(|b| if *b == b' ' { b'+' } else { *b })
                    .collect(),
            )
        } else {
            Cow::Borrowed(s.as_bytes())
        }
    })
}

/// Encodes `input` into `buffer`.
pub fn encode_into(buffer: &mut Vec<u8>, input: &str, use_form_encoding: bool) {
    for encoded in encode(input.as_bytes(), use_form_encoding) {
        buffer.extend_from_slice(&encoded);
    }
}
