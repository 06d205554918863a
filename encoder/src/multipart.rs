use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::error::{DecodeError, EncodeError};
use crate::source::ContentSource;
use crate::urlencoded::unescape;

// RFC 5987 attr-char, used for Content-Disposition parameter values.
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

const MAX_BOUNDARY_LEN: usize = 70;

/// One part of a `multipart/form-data` body.
///
/// A field part carries an inline string value; a file part carries a
/// filename and a [`ContentSource`] that is read once, at encode time.
/// Extra headers are emitted after `Content-Disposition` in insertion order.
#[derive(Debug)]
pub enum Part {
    Field {
        name: String,
        value: String,
        headers: Vec<(String, String)>,
    },
    File {
        name: String,
        filename: String,
        content: ContentSource,
        headers: Vec<(String, String)>,
    },
}

impl Part {
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Part::Field {
            name: name.into(),
            value: value.into(),
            headers: Vec::new(),
        }
    }

    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<ContentSource>,
    ) -> Self {
        Part::File {
            name: name.into(),
            filename: filename.into(),
            content: content.into(),
            headers: Vec::new(),
        }
    }

    /// Appends an extra part header, e.g. `Content-Type`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (Part::Field { headers, .. } | Part::File { headers, .. }) = &mut self;
        headers.push((name.into(), value.into()));
        self
    }
}

/// The `Content-Type` value matching a body encoded with `boundary`.
///
/// The boundary is caller-chosen so that this header and the encoded body
/// share a single source of truth.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Encodes parts as a `multipart/form-data` body delimited by `boundary`.
///
/// Each part is framed as `--<boundary>`, its headers, a blank line, and its
/// content, all CRLF-separated; the body ends with `--<boundary>--`. The
/// boundary must be non-empty, at most 70 characters, and drawn from the
/// RFC 2046 `bchars` set. The boundary must not occur inside any part's
/// content; that collision is not checked here.
///
/// On error nothing is produced: the result is either the complete body or
/// an [`EncodeError`], never a prefix.
pub fn encode(boundary: &str, parts: Vec<Part>) -> Result<Vec<u8>, EncodeError> {
    validate_boundary(boundary)?;

    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            Part::Field {
                name,
                value,
                headers,
            } => {
                write_headers(&mut out, &disposition(&name, None), &headers);
                out.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                mut content,
                headers,
            } => {
                write_headers(&mut out, &disposition(&name, Some(&filename)), &headers);
                out.extend_from_slice(&content.take()?);
            }
        }
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    Ok(out)
}

fn validate_boundary(boundary: &str) -> Result<(), EncodeError> {
    if boundary.is_empty() {
        return Err(EncodeError::EmptyBoundary);
    }
    if boundary.len() > MAX_BOUNDARY_LEN || boundary.ends_with(' ') {
        return Err(EncodeError::InvalidBoundary(boundary.to_string()));
    }
    let valid = boundary.bytes().all(|b| {
        b.is_ascii_alphanumeric() || b" '()+_,-./:=?".contains(&b)
    });
    if !valid {
        return Err(EncodeError::InvalidBoundary(boundary.to_string()));
    }
    Ok(())
}

fn disposition(name: &str, filename: Option<&str>) -> String {
    let name = percent_encode(name.as_bytes(), ATTR_CHAR_ENCODE_SET);
    match filename {
        Some(filename) => {
            let filename = percent_encode(filename.as_bytes(), ATTR_CHAR_ENCODE_SET);
            format!("form-data; name=\"{name}\"; filename=\"{filename}\"")
        }
        None => format!("form-data; name=\"{name}\""),
    }
}

fn write_headers(out: &mut Vec<u8>, disposition: &str, extras: &[(String, String)]) {
    out.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    for (name, value) in extras {
        out.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
    }
    out.extend_from_slice(b"\r\n");
}

/// A part recovered by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPart {
    pub name: String,
    pub filename: Option<String>,
    pub headers: Vec<(String, String)>,
    pub content: Vec<u8>,
}

/// Parses a `multipart/form-data` body framed by `boundary` back into parts.
///
/// Parts come back in wire order with names, filenames, extra headers, and
/// content bytes intact.
pub fn decode(body: &[u8], boundary: &str) -> Result<Vec<DecodedPart>, DecodeError> {
    let opening = format!("--{boundary}");
    let closing = format!("--{boundary}--");

    if body.starts_with(closing.as_bytes()) {
        return Ok(Vec::new());
    }
    if !body.starts_with(opening.as_bytes()) || !body[opening.len()..].starts_with(b"\r\n") {
        return Err(DecodeError::MalformedMultipart(
            "body does not start with the boundary delimiter".to_string(),
        ));
    }

    let marker = format!("\r\n--{boundary}");
    let mut parts = Vec::new();
    let mut pos = opening.len() + 2;
    loop {
        let end = find(body, marker.as_bytes(), pos).ok_or_else(|| {
            DecodeError::MalformedMultipart("missing closing boundary".to_string())
        })?;
        parts.push(parse_part(&body[pos..end])?);

        let after = end + marker.len();
        if body[after..].starts_with(b"--") {
            return Ok(parts);
        }
        if !body[after..].starts_with(b"\r\n") {
            return Err(DecodeError::MalformedMultipart(
                "boundary delimiter not followed by CRLF".to_string(),
            ));
        }
        pos = after + 2;
    }
}

fn parse_part(segment: &[u8]) -> Result<DecodedPart, DecodeError> {
    let split = find(segment, b"\r\n\r\n", 0).ok_or_else(|| {
        DecodeError::MalformedMultipart("part has no header/content separator".to_string())
    })?;
    let (header_block, content) = (&segment[..split], &segment[split + 4..]);

    let mut name = None;
    let mut filename = None;
    let mut headers = Vec::new();
    let header_block = std::str::from_utf8(header_block).map_err(|_| {
        DecodeError::MalformedMultipart("part headers are not valid UTF-8".to_string())
    })?;
    for line in header_block.split("\r\n") {
        let (header_name, header_value) = line.split_once(':').ok_or_else(|| {
            DecodeError::MalformedMultipart(format!("malformed part header: {line}"))
        })?;
        let header_value = header_value.trim_start();
        if header_name.eq_ignore_ascii_case("content-disposition") {
            (name, filename) = parse_disposition(header_value)?;
        } else {
            headers.push((header_name.to_string(), header_value.to_string()));
        }
    }

    let name = name.ok_or(DecodeError::MissingDisposition)?;
    Ok(DecodedPart {
        name,
        filename,
        headers,
        content: content.to_vec(),
    })
}

fn parse_disposition(value: &str) -> Result<(Option<String>, Option<String>), DecodeError> {
    let mut name = None;
    let mut filename = None;
    for param in value.split(';').skip(1) {
        let Some((key, raw)) = param.trim().split_once('=') else {
            continue;
        };
        let unquoted = raw.trim_matches('"');
        let decoded = String::from_utf8(unescape(unquoted.as_bytes(), 0, false)?)?;
        match key {
            "name" => name = Some(decoded),
            "filename" => filename = Some(decoded),
            _ => {}
        }
    }
    Ok((name, filename))
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|p| p + from)
}
