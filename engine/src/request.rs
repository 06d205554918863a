use bytes::Bytes;
use encoder::{ContentSource, FormField, Part, multipart, urlencoded};
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request, Uri};

use crate::error::EngineError;

/// An in-memory HTTP request assembled by test code.
///
/// The body stays a one-shot [`ContentSource`] until dispatch, so building a
/// request never serializes anything. Builder methods defer their first
/// construction error until the request is consumed, the same way
/// `http::request::Builder` does.
#[derive(Debug)]
pub struct SyntheticRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: ContentSource,
    error: Option<EngineError>,
}

impl SyntheticRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: ContentSource::empty(),
            error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a header. Repeated names accumulate as multiple values.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = match HeaderName::try_from(name) {
            Ok(name) => name,
            Err(e) => {
                self.error = Some(e.into());
                return self;
            }
        };
        match HeaderValue::try_from(value) {
            Ok(value) => {
                self.headers.append(name, value);
            }
            Err(e) => self.error = Some(e.into()),
        }
        self
    }

    pub fn body(mut self, body: impl Into<ContentSource>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a form-urlencoded body and the matching `Content-Type` header.
    /// Encoding runs at dispatch time, not here.
    pub fn form(mut self, fields: Vec<FormField>) -> Self {
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self.body = ContentSource::producer(move || urlencoded::encode(&fields));
        self
    }

    /// Sets a multipart body and a `Content-Type` header naming `boundary`.
    /// Encoding (including boundary validation and file-content reads) runs
    /// at dispatch time.
    pub fn multipart(mut self, boundary: &str, parts: Vec<Part>) -> Self {
        if self.error.is_none() {
            match HeaderValue::try_from(multipart::content_type(boundary)) {
                Ok(value) => {
                    self.headers.insert(CONTENT_TYPE, value);
                }
                Err(e) => self.error = Some(e.into()),
            }
        }
        let boundary = boundary.to_string();
        self.body = ContentSource::try_producer(move || multipart::encode(&boundary, parts));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Converts into the pipeline-facing request, pulling the body bytes
    /// from the content source exactly once.
    pub(crate) fn into_http(mut self) -> Result<Request<Bytes>, EngineError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let uri = Uri::try_from(self.path.as_str())?;
        let body = self.body.take()?;

        let mut request = Request::new(body);
        *request.method_mut() = self.method;
        *request.uri_mut() = uri;
        *request.headers_mut() = self.headers;
        Ok(request)
    }
}
