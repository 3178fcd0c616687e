//! Message head serialization.
//!
//! The start line is followed by one `key:value` line per header (no space after the
//! colon) and the terminating blank line. Requests and responses share the framing, so
//! a serialized message can always be fed back into the decoder.

use bytes::{BufMut, BytesMut};
use http::Version;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{Headers, Response, SendError};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Returns the wire form of an HTTP/1.x version.
///
/// # Errors
///
/// Returns [`SendError::UnsupportedVersion`] for anything other than HTTP/1.0 and HTTP/1.1.
pub(crate) fn version_str(version: Version) -> Result<&'static str, SendError> {
    match version {
        Version::HTTP_10 => Ok("HTTP/1.0"),
        Version::HTTP_11 => Ok("HTTP/1.1"),
        v => {
            error!(http_version = ?v, "unsupported http version");
            Err(SendError::UnsupportedVersion(v))
        }
    }
}

/// Writes `start_line` joined by single spaces, the headers and the blank line.
pub(crate) fn write_head(dst: &mut BytesMut, start_line: [&str; 3], headers: &Headers) {
    dst.reserve(INIT_HEADER_SIZE);

    let [first, second, third] = start_line;
    dst.put_slice(first.as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(second.as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(third.as_bytes());
    dst.put_slice(b"\r\n");

    for (name, value) in headers.iter() {
        dst.put_slice(name.as_bytes());
        dst.put_u8(b':');
        dst.put_slice(value.as_bytes());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

/// Encoder for the status line and headers of a [`Response`].
///
/// The headers are written as they are; computing `content-length` and
/// `content-encoding` is left to the [`ResponseEncoder`](crate::codec::ResponseEncoder).
#[derive(Debug)]
pub struct HeaderEncoder;

impl Encoder<&Response> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, response: &Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let version = version_str(response.version())?;
        write_head(dst, [version, response.status().as_str(), response.reason()], response.headers());
        Ok(())
    }
}
