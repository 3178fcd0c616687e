//! Parsed HTTP request representation.
//!
//! A [`Request`] is built once per connection by the
//! [`RequestDecoder`](crate::codec::RequestDecoder) and is immutable afterwards.

use bytes::{Bytes, BytesMut};
use http::{Method, Version};

use crate::codec::{version_str, write_head};
use crate::protocol::{Headers, SendError};

/// An HTTP request with a fully buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    version: Version,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, version: Version, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self { method, path: path.into(), version, headers, body: body.into() }
    }

    /// Returns a reference to the request method, exactly as it appeared on the wire.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request target. It always starts with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Splits the path at every `/`.
    ///
    /// The leading separator yields an empty first segment, so `/` gives `["", ""]` and
    /// `/echo/abc` gives `["", "echo", "abc"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }

    /// Serializes the request with the same head framing the response encoder uses.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] if the version can't be written as HTTP/1.x.
    pub fn write_to(&self, dst: &mut BytesMut) -> Result<(), SendError> {
        let version = version_str(self.version)?;
        write_head(dst, [self.method.as_str(), &self.path, version], &self.headers);
        dst.extend_from_slice(&self.body);
        Ok(())
    }
}
