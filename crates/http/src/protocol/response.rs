//! HTTP response representation.
//!
//! Handlers build a [`Response`] with an unencoded body. The
//! [`ResponseEncoder`](crate::codec::ResponseEncoder) later compresses the body if a
//! coding was negotiated and appends the computed `content-length`.

use bytes::Bytes;
use http::{StatusCode, Version};

use crate::protocol::Headers;

/// An HTTP response whose body is still in its pre-encoding form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    version: Version,
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    /// Creates an HTTP/1.1 response with no headers and an empty body.
    pub fn new(status: StatusCode) -> Self {
        Self { version: Version::HTTP_11, status, headers: Headers::new(), body: Bytes::new() }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn created() -> Self {
        Self::new(StatusCode::CREATED)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    #[must_use]
    pub fn with_header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase written on the status line.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn builder_style() {
        let response = Response::ok().with_header(CONTENT_TYPE, "text/plain").with_body("abc").with_version(Version::HTTP_10);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.version(), Version::HTTP_10);
        assert_eq!(response.headers().get("content-type"), Some("text/plain"));
        assert_eq!(&response.body()[..], b"abc");
    }

    #[test]
    fn reasons() {
        assert_eq!(Response::created().reason(), "Created");
        assert_eq!(Response::not_found().reason(), "Not Found");
        assert_eq!(Response::new(StatusCode::INTERNAL_SERVER_ERROR).reason(), "Internal Server Error");
    }
}
