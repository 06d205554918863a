use bytes::Bytes;
use http::header::HeaderMap;
use http::{Method, StatusCode};

/// The response captured from one dispatch.
#[derive(Debug, Clone)]
pub struct SyntheticResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl SyntheticResponse {
    /// Looks up a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// The observable outcome of dispatching one synthetic request.
///
/// `response` is `None` when the pipeline ran to completion without any
/// stage responding. That is the normal "no route matched" outcome and is
/// distinct from a handled error response such as a 404, which carries
/// `Some(response)`.
#[derive(Debug)]
pub struct CallRecord {
    pub method: Method,
    pub path: String,
    pub request_headers: HeaderMap,
    pub response: Option<SyntheticResponse>,
}

impl CallRecord {
    pub fn handled(&self) -> bool {
        self.response.is_some()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|r| r.status)
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.response.as_ref().map(|r| &r.body)
    }

    pub fn body_text(&self) -> Option<&str> {
        self.response.as_ref().and_then(SyntheticResponse::body_text)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.as_ref().and_then(|r| r.header(name))
    }
}
