use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Multipart boundary is empty")]
    EmptyBoundary,

    #[error("Invalid multipart boundary: {0}")]
    InvalidBoundary(String),

    #[error("Content source already consumed")]
    Reused,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Truncated percent escape at byte {0}")]
    TruncatedEscape(usize),

    #[error("Invalid percent escape at byte {0}")]
    InvalidEscape(usize),

    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Malformed multipart framing: {0}")]
    MalformedMultipart(String),

    #[error("Part is missing a Content-Disposition header")]
    MissingDisposition,
}
