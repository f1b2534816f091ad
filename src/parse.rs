//! Parsing of already-encoded query strings into [`QueryValues`].

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::values::QueryValues;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

/// Decodes one key or value, applying the following:
/// - Replaces `+` with a space
/// - Decodes percent-encoded characters
///
/// `offset` is the position of `input` within the full query string and is
/// only used to report the position of an invalid escape.
///
/// Borrows the input when there is nothing to decode.
pub(crate) fn decode(input: &[u8], offset: usize) -> Result<Cow<'_, [u8]>> {
    if !input.iter().any(|&b| b == b'+' || b == b'%') {
        return Ok(Cow::Borrowed(input));
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut idx = 0;
    while let Some(&b) = input.get(idx) {
        match b {
            b'+' => {
                decoded.push(b' ');
                idx += 1;
            }
            b'%' => {
                let escape = input.get(idx..idx + 3).unwrap_or(&input[idx..]);
                let digits = match escape {
                    [_, h, l] => char_to_digit(*h).zip(char_to_digit(*l)),
                    _ => None,
                };
                let Some((h, l)) = digits else {
                    return Err(Error::InvalidEscape {
                        position: offset + idx,
                        escape: String::from_utf8_lossy(escape).into_owned(),
                    });
                };
                decoded.push(h * 0x10 + l);
                idx += 3;
            }
            _ => {
                decoded.push(b);
                idx += 1;
            }
        }
    }

    Ok(Cow::Owned(decoded))
}

fn decode_utf8(value: Cow<'_, [u8]>) -> Result<String> {
    Ok(match value {
        Cow::Borrowed(bytes) => std::str::from_utf8(bytes)?.to_owned(),
        Cow::Owned(bytes) => String::from_utf8(bytes).map_err(|e| e.utf8_error())?,
    })
}

/// Parses `a=1&a=2&b=` style input.
///
/// One leading `?` is ignored, empty pairs are skipped and a pair without
/// `=` has an empty value. A `;` anywhere in a pair is rejected rather than
/// treated as a separator.
pub(crate) fn parse(input: &[u8]) -> Result<QueryValues> {
    let (input, mut offset) = match input.strip_prefix(b"?") {
        Some(rest) => (rest, 1),
        None => (input, 0),
    };

    let mut values = QueryValues::new();
    for pair in input.split(|&b| b == b'&') {
        let start = offset;
        offset += pair.len() + 1;
        if pair.is_empty() {
            continue;
        }
        if pair.contains(&b';') {
            return Err(Error::SemicolonSeparator);
        }

        let (key, value) = match pair.iter().position(|&b| b == b'=') {
            Some(eq) => (&pair[..eq], &pair[eq + 1..]),
            None => (pair, &pair[pair.len()..]),
        };
        let value_start = start + key.len() + 1;
        let key = decode_utf8(decode(key, start)?)?;
        let value = decode_utf8(decode(value, value_start)?)?;
        values.add(key, value);
    }

    tracing::trace!(keys = values.len(), "parsed pre-encoded query string");
    Ok(values)
}
