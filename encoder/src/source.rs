use std::fmt;

use bytes::Bytes;

use crate::error::EncodeError;

enum Inner {
    Bytes(Bytes),
    Producer(Box<dyn FnOnce() -> Result<Vec<u8>, EncodeError> + Send>),
}

/// A one-shot byte producer for request and file-part content.
///
/// Content is not materialized until [`take`](ContentSource::take) is called,
/// so a large payload can be produced at the moment an encoder or the engine
/// actually needs the bytes. Each source yields its bytes at most once;
/// taking twice fails with [`EncodeError::Reused`].
pub struct ContentSource {
    inner: Option<Inner>,
}

impl ContentSource {
    pub fn empty() -> Self {
        Self::bytes(Bytes::new())
    }

    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Some(Inner::Bytes(bytes.into())),
        }
    }

    /// A source backed by a closure, run once at take time.
    pub fn producer<F>(produce: F) -> Self
    where
        F: FnOnce() -> Vec<u8> + Send + 'static,
    {
        Self::try_producer(|| Ok(produce()))
    }

    /// A source backed by a fallible closure, run once at take time.
    pub fn try_producer<F>(produce: F) -> Self
    where
        F: FnOnce() -> Result<Vec<u8>, EncodeError> + Send + 'static,
    {
        Self {
            inner: Some(Inner::Producer(Box::new(produce))),
        }
    }

    /// Consumes the source, yielding its bytes.
    ///
    /// Fails with [`EncodeError::Reused`] if the source was already taken.
    pub fn take(&mut self) -> Result<Bytes, EncodeError> {
        match self.inner.take() {
            Some(Inner::Bytes(bytes)) => Ok(bytes),
            Some(Inner::Producer(produce)) => Ok(Bytes::from(produce()?)),
            None => Err(EncodeError::Reused),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.inner.is_none()
    }
}

impl Default for ContentSource {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(Inner::Bytes(bytes)) => f.debug_tuple("ContentSource").field(&bytes.len()).finish(),
            Some(Inner::Producer(_)) => f.write_str("ContentSource(deferred)"),
            None => f.write_str("ContentSource(consumed)"),
        }
    }
}

impl From<&str> for ContentSource {
    fn from(value: &str) -> Self {
        Self::bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for ContentSource {
    fn from(value: String) -> Self {
        Self::bytes(value.into_bytes())
    }
}

impl From<Vec<u8>> for ContentSource {
    fn from(value: Vec<u8>) -> Self {
        Self::bytes(value)
    }
}

impl From<Bytes> for ContentSource {
    fn from(value: Bytes) -> Self {
        Self::bytes(value)
    }
}
