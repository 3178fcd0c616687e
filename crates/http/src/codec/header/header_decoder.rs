//! Request head decoder.
//!
//! Parses the request line and header section with `httparse`, then copies the parsed
//! pieces into owned [`Headers`] so the source buffer can be advanced past the blank
//! line right away.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header section size: 8KB
//! - Only HTTP/1.0 and HTTP/1.1 request lines are accepted

use bytes::{Buf, Bytes, BytesMut};
use http::header::CONTENT_LENGTH;
use http::{Method, Version};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{Headers, ParseError, PayloadSize, Request};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Everything of a request except its body.
#[derive(Debug)]
pub struct RequestHead {
    method: Method,
    path: String,
    version: Version,
    headers: Headers,
}

impl RequestHead {
    /// Attaches the body, producing the final [`Request`].
    pub(crate) fn body(self, body: Bytes) -> Request {
        Request::new(self.method, self.path, self.version, self.headers, body)
    }
}

/// Decoder for the request line and headers.
///
/// Yields the [`RequestHead`] together with the [`PayloadSize`] derived from its
/// `content-length` header. The consumed head bytes are removed from the buffer, so
/// whatever remains belongs to the body.
#[derive(Debug)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHead, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode a request head from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, payload_size)))` if the whole header section was parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let parsed = req.parse(src).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        })?;

        let head_size = match parsed {
            Status::Complete(head_size) => head_size,
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                return Ok(None);
            }
        };
        trace!(head_size, "parsed request head");
        ensure!(head_size <= MAX_HEADER_BYTES, ParseError::too_large_header(head_size, MAX_HEADER_BYTES));

        let version = match req.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            v => return Err(ParseError::InvalidVersion(v)),
        };

        let method = req.method.ok_or(ParseError::InvalidMethod)?;
        let method = Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?;

        let path = req.path.ok_or(ParseError::InvalidUri)?;
        ensure!(path.starts_with('/'), ParseError::InvalidUri);

        let mut header_list = Headers::with_capacity(req.headers.len());
        for header in req.headers.iter() {
            let value = std::str::from_utf8(header.value)
                .map_err(|e| ParseError::invalid_header(format!("value of {} is not utf-8: {e}", header.name)))?;
            header_list.append(header.name, value);
        }

        let head = RequestHead { method, path: path.to_owned(), version, headers: header_list };
        let payload_size = parse_payload(&head.headers)?;

        src.advance(head_size);
        Ok(Some((head, payload_size)))
    }
}

/// Determines how the body is delimited.
///
/// A `content-length` header frames the body; without one the body is unframed and the
/// caller takes whatever bytes follow the header section.
fn parse_payload(headers: &Headers) -> Result<PayloadSize, ParseError> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(PayloadSize::Unframed);
    };

    let length =
        value.trim().parse::<u64>().map_err(|_e| ParseError::invalid_content_length(format!("value {value} is not u64")))?;

    Ok(PayloadSize::Length(length))
}
