use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid header name: {0}")]
    HeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("Invalid request target: {0}")]
    Uri(#[from] http::uri::InvalidUri),

    #[error("Body encoding failed: {0}")]
    Encode(#[from] encoder::EncodeError),

    #[error("Pipeline failure: {0}")]
    Pipeline(#[source] BoxError),
}
