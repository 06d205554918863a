//! Request-Body Encoders
//!
//! This crate produces the two request-body formats the simulation engine
//! feeds into a pipeline: `application/x-www-form-urlencoded` and
//! `multipart/form-data`. Both encoders are pure functions from structured
//! input to bytes, and both are byte-exact with the standard wire formats so
//! an encoded body can equally be replayed over a real transport.
//!
//! Matching decoders are provided so a consuming pipeline (or a test) can
//! recover the original fields and parts from an encoded body.
//!
//! # Examples
//!
//! ```
//! use encoder::{multipart, urlencoded, ContentSource, FormField, Part};
//!
//! // Form-encode a pair of fields.
//! let body = urlencoded::encode(&[
//!     FormField::new("name1", "value1"),
//!     FormField::new("name2", "value2"),
//! ]);
//! assert_eq!(body, b"name1=value1&name2=value2");
//!
//! // Build a multipart body with a field and a lazily-read file.
//! let parts = vec![
//!     Part::field("kind", "avatar"),
//!     Part::file("upload", "avatar.png", ContentSource::producer(|| vec![0x89, 0x50])),
//! ];
//! let body = multipart::encode("sim-boundary", parts).unwrap();
//!
//! let recovered = multipart::decode(&body, "sim-boundary").unwrap();
//! assert_eq!(recovered.len(), 2);
//! assert_eq!(recovered[1].filename.as_deref(), Some("avatar.png"));
//! ```

mod error;
pub mod multipart;
mod source;
pub mod urlencoded;

pub use error::{DecodeError, EncodeError};
pub use multipart::{DecodedPart, Part};
pub use source::ContentSource;
pub use urlencoded::FormField;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencoded_round_trip() {
        let fields = vec![
            FormField::new("plain", "value"),
            FormField::new("spaced key", "a b"),
            FormField::new("reserved", "a=b&c"),
        ];
        let body = urlencoded::encode(&fields);
        assert_eq!(urlencoded::decode(&body).unwrap(), fields);
    }

    #[test]
    fn test_multipart_round_trip() {
        let parts = vec![
            Part::field("title", "hello"),
            Part::file("data", "data.bin", vec![0u8, 1, 2, 3]),
        ];
        let body = multipart::encode("xyz", parts).unwrap();
        let recovered = multipart::decode(&body, "xyz").unwrap();

        assert_eq!(recovered[0].name, "title");
        assert_eq!(recovered[0].content, b"hello");
        assert_eq!(recovered[1].filename.as_deref(), Some("data.bin"));
        assert_eq!(recovered[1].content, vec![0u8, 1, 2, 3]);
    }
}
