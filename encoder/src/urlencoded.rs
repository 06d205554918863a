use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::error::DecodeError;

// Everything outside unreserved (ALPHA / DIGIT / "-" / "_" / "." / "~") is
// escaped. Space becomes "%20", never "+".
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A single name/value pair of an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Encodes fields as an `application/x-www-form-urlencoded` body.
///
/// Pairs are emitted in input order as `name=value` joined by `&`. Characters
/// outside `ALPHA / DIGIT / "-" / "_" / "." / "~"` are percent-escaped with
/// uppercase hex, byte-wise over the UTF-8 encoding; space encodes as `%20`.
/// An empty field list yields an empty body. The caller is responsible for
/// setting the `Content-Type` header; the encoder never touches headers.
pub fn encode(fields: &[FormField]) -> Vec<u8> {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.extend(percent_encode(field.name.as_bytes(), FORM_ENCODE_SET));
        out.push('=');
        out.extend(percent_encode(field.value.as_bytes(), FORM_ENCODE_SET));
    }
    out.into_bytes()
}

/// Decodes an `application/x-www-form-urlencoded` body back into fields.
///
/// Accepts `+` as a space in addition to `%20`. A pair without `=` decodes to
/// a field with an empty value.
pub fn decode(body: &[u8]) -> Result<Vec<FormField>, DecodeError> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = Vec::new();
    let mut offset = 0;
    for pair in body.split(|&b| b == b'&') {
        let (name, value) = match pair.iter().position(|&b| b == b'=') {
            Some(eq) => (&pair[..eq], &pair[eq + 1..]),
            None => (pair, &pair[pair.len()..]),
        };
        let value_offset = offset + name.len() + 1;
        fields.push(FormField {
            name: unescape_string(name, offset, true)?,
            value: unescape_string(value, value_offset, true)?,
        });
        offset += pair.len() + 1;
    }
    Ok(fields)
}

fn unescape_string(
    bytes: &[u8],
    offset: usize,
    plus_as_space: bool,
) -> Result<String, DecodeError> {
    Ok(String::from_utf8(unescape(bytes, offset, plus_as_space)?)?)
}

/// Reverses percent escapes, reporting the absolute byte offset of any
/// malformed escape. Used by both body decoders.
pub(crate) fn unescape(
    bytes: &[u8],
    offset: usize,
    plus_as_space: bool,
) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(DecodeError::TruncatedEscape(offset + i));
                }
                let high = hex_digit(bytes[i + 1]);
                let low = hex_digit(bytes[i + 2]);
                match (high, low) {
                    (Some(h), Some(l)) => out.push(h << 4 | l),
                    _ => return Err(DecodeError::InvalidEscape(offset + i)),
                }
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    Ok(out)
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
