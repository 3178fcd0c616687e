//! HTTP request decoder module
//!
//! Decodes one complete [`Request`] from a byte stream. Data is buffered across reads:
//! the decoder waits for the full header section, then for `content-length` body bytes.
//!
//! # Example
//!
//! ```
//! use tern_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.path(), "/");
//! ```

use crate::codec::header::{HeaderDecoder, RequestHead};
use crate::protocol::{ParseError, PayloadSize, Request};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

/// Default upper bound for a request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// A decoder for HTTP requests with fully buffered bodies
///
/// The decoder operates in two phases:
/// 1. Header parsing: decodes the request head using [`HeaderDecoder`]
/// 2. Body collection: waits for `content-length` bytes, or takes the bytes already
///    buffered after the head when no length was announced
///
/// # State Machine
///
/// The decoder maintains its state through the `head` field:
/// - `None`: Currently parsing headers
/// - `Some(_)`: Head parsed, waiting for the rest of the body
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    head: Option<(RequestHead, PayloadSize)>,
    max_body_bytes: usize,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` with the default body limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `RequestDecoder` rejecting bodies larger than `max_body_bytes`
    pub fn with_max_body_bytes(max_body_bytes: usize) -> Self {
        Self { header_decoder: HeaderDecoder, head: None, max_body_bytes }
    }

    fn check_body_size(&self, length: u64) -> Result<usize, ParseError> {
        usize::try_from(length)
            .ok()
            .filter(|length| *length <= self.max_body_bytes)
            .ok_or(ParseError::too_large_body(length, self.max_body_bytes))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_max_body_bytes(DEFAULT_MAX_BODY_BYTES)
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a complete request was decoded
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.head.is_none() {
            match self.header_decoder.decode(src)? {
                Some(head) => self.head = Some(head),
                None => return Ok(None),
            }
        }

        let Some((head, payload_size)) = self.head.take() else {
            return Ok(None);
        };

        let body = match payload_size {
            PayloadSize::Length(length) => {
                let length = self.check_body_size(length)?;
                if src.len() < length {
                    trace!(received = src.len(), expected = length, "waiting for the rest of the body");
                    src.reserve(length - src.len());
                    self.head = Some((head, payload_size));
                    return Ok(None);
                }
                src.split_to(length).freeze()
            }
            PayloadSize::Unframed => {
                self.check_body_size(src.len() as u64)?;
                src.split().freeze()
            }
        };

        Ok(Some(head.body(body)))
    }

    /// Decodes what is left once the peer stopped sending.
    ///
    /// An empty buffer means the peer closed without starting a request. Leftover bytes
    /// that don't form a complete request are reported as [`ParseError::Incomplete`].
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None if src.is_empty() && self.head.is_none() => Ok(None),
            None => Err(ParseError::Incomplete { buffered: src.len() }),
        }
    }
}
