use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use encoder::{ContentSource, EncodeError, Part, multipart};

const BOUNDARY: &str = "sim-boundary-7af3";

#[test]
fn test_field_part_exact_framing() {
    let body = multipart::encode(BOUNDARY, vec![Part::field("greeting", "hello")]).unwrap();

    let expected = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"greeting\"\r\n\
         \r\n\
         hello\r\n\
         --{BOUNDARY}--\r\n"
    );
    assert_eq!(body, expected.as_bytes());
}

#[test]
fn test_file_part_carries_filename_and_content() {
    let body = multipart::encode(
        BOUNDARY,
        vec![Part::file("upload", "notes.txt", "file contents")],
    )
    .unwrap();

    let expected = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"upload\"; filename=\"notes.txt\"\r\n\
         \r\n\
         file contents\r\n\
         --{BOUNDARY}--\r\n"
    );
    assert_eq!(body, expected.as_bytes());
}

#[test]
fn test_extra_headers_follow_disposition_in_order() {
    let part = Part::file("upload", "a.bin", vec![1u8, 2, 3])
        .header("Content-Type", "application/octet-stream")
        .header("X-Checksum", "abc123");
    let body = multipart::encode(BOUNDARY, vec![part]).unwrap();
    let text = String::from_utf8_lossy(&body);

    let disposition = text.find("Content-Disposition").unwrap();
    let content_type = text.find("Content-Type").unwrap();
    let checksum = text.find("X-Checksum").unwrap();
    assert!(disposition < content_type);
    assert!(content_type < checksum);
}

#[test]
fn test_empty_parts_yields_terminator_only() {
    let body = multipart::encode(BOUNDARY, Vec::new()).unwrap();
    assert_eq!(body, format!("--{BOUNDARY}--\r\n").as_bytes());
}

#[test]
fn test_empty_boundary_rejected_before_output() {
    let result = multipart::encode("", vec![Part::field("a", "b")]);
    assert!(matches!(result, Err(EncodeError::EmptyBoundary)));
}

#[test]
fn test_boundary_with_invalid_characters_rejected() {
    let result = multipart::encode("bad\"boundary", vec![Part::field("a", "b")]);
    assert!(matches!(result, Err(EncodeError::InvalidBoundary(_))));
}

#[test]
fn test_boundary_longer_than_70_chars_rejected() {
    let boundary = "x".repeat(71);
    let result = multipart::encode(&boundary, Vec::new());
    assert!(matches!(result, Err(EncodeError::InvalidBoundary(_))));
}

#[test]
fn test_content_type_names_the_boundary() {
    assert_eq!(
        multipart::content_type(BOUNDARY),
        format!("multipart/form-data; boundary={BOUNDARY}")
    );
}

#[test]
fn test_file_content_produced_exactly_once_per_encode() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let part = Part::file(
        "upload",
        "big.dat",
        ContentSource::producer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![0u8; 64]
        }),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 0, "never during construction");
    multipart::encode(BOUNDARY, vec![part]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_consumed_source_fails_with_reuse_error() {
    let mut source = ContentSource::from("payload");
    source.take().unwrap();

    let result = multipart::encode(BOUNDARY, vec![Part::file("f", "f.bin", source)]);
    assert!(matches!(result, Err(EncodeError::Reused)));
}

#[test]
fn test_round_trip_recovers_parts_in_order() {
    let parts = vec![
        Part::field("first", "one"),
        Part::file("second", "two.bin", vec![0u8, 255, 13, 10]).header("Content-Type", "application/octet-stream"),
        Part::field("third", "three"),
    ];
    let body = multipart::encode(BOUNDARY, parts).unwrap();
    let recovered = multipart::decode(&body, BOUNDARY).unwrap();

    assert_eq!(recovered.len(), 3);

    assert_eq!(recovered[0].name, "first");
    assert_eq!(recovered[0].filename, None);
    assert_eq!(recovered[0].content, b"one");

    assert_eq!(recovered[1].name, "second");
    assert_eq!(recovered[1].filename.as_deref(), Some("two.bin"));
    assert_eq!(
        recovered[1].headers,
        vec![("Content-Type".to_string(), "application/octet-stream".to_string())]
    );
    assert_eq!(recovered[1].content, vec![0u8, 255, 13, 10]);

    assert_eq!(recovered[2].name, "third");
}

#[test]
fn test_round_trip_percent_escaped_names() {
    let parts = vec![Part::file("weird \"name\"", "päth/file.txt", "x")];
    let body = multipart::encode(BOUNDARY, parts).unwrap();
    let recovered = multipart::decode(&body, BOUNDARY).unwrap();

    assert_eq!(recovered[0].name, "weird \"name\"");
    assert_eq!(recovered[0].filename.as_deref(), Some("päth/file.txt"));
}

#[test]
fn test_decode_empty_body_with_terminator_only() {
    let body = format!("--{BOUNDARY}--\r\n");
    assert!(multipart::decode(body.as_bytes(), BOUNDARY).unwrap().is_empty());
}

#[test]
fn test_decode_rejects_missing_closing_boundary() {
    let body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nvalue");
    let result = multipart::decode(body.as_bytes(), BOUNDARY);
    assert!(result.is_err());
}

#[test]
fn test_decode_part_content_may_contain_crlf() {
    let parts = vec![Part::field("text", "line one\r\nline two")];
    let body = multipart::encode(BOUNDARY, parts).unwrap();
    let recovered = multipart::decode(&body, BOUNDARY).unwrap();
    assert_eq!(recovered[0].content, b"line one\r\nline two");
}
