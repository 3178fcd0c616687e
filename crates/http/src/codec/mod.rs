//! HTTP codec module for decoding requests and encoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: Decodes one complete HTTP request, body included
//!   - Head parsing via `HeaderDecoder`, head writing via `HeaderEncoder`
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: Encodes a response, appending computed headers
//!   - [`ContentCoding`]: Negotiates and applies the response content coding
//!
//! # Example
//!
//! ```
//! use tern_http::codec::{ContentCoding, RequestDecoder, ResponseEncoder};
//! use tern_http::protocol::Response;
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut request_buffer = BytesMut::from(&b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n"[..]);
//! let request = RequestDecoder::new().decode(&mut request_buffer).unwrap().unwrap();
//!
//! let coding = ContentCoding::negotiate(request.headers().get("accept-encoding"));
//! let mut response_buffer = BytesMut::new();
//! ResponseEncoder::new().encode((Response::ok().with_body("abc"), coding), &mut response_buffer).unwrap();
//! ```

mod encoding;
mod header;
mod request_decoder;
mod response_encoder;

pub use encoding::ContentCoding;
pub(crate) use header::{version_str, write_head};
pub use request_decoder::{DEFAULT_MAX_BODY_BYTES, RequestDecoder};
pub use response_encoder::ResponseEncoder;
