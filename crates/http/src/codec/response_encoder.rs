use crate::codec::ContentCoding;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{Response, SendError};
use bytes::BytesMut;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH};
use tokio_util::codec::Encoder;
use tracing::trace;

/// Encodes a [`Response`] into its final wire bytes.
///
/// The whole message is produced in memory: the body is compressed with the negotiated
/// [`ContentCoding`] (if any), `content-encoding` and `content-length` are appended, and
/// only then are the head and body written to `dst`.
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder }
    }
}

impl Encoder<(Response, Option<ContentCoding>)> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (Response, Option<ContentCoding>), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut response, coding) = item;

        // content-length always describes the bytes we actually send
        response.headers_mut().remove(CONTENT_LENGTH);

        let body = match coding {
            Some(coding) if !response.body().is_empty() && !response.headers().contains(CONTENT_ENCODING) => {
                let encoded = coding.encode(response.body())?;
                trace!(coding = coding.name(), raw_size = response.body().len(), encoded_size = encoded.len(), "encoded response body");
                response.headers_mut().append(CONTENT_ENCODING, coding.name());
                encoded
            }
            _ => response.body().clone(),
        };

        response.headers_mut().append(CONTENT_LENGTH, body.len().to_string());

        self.header_encoder.encode(&response, dst)?;
        dst.extend_from_slice(&body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use http::StatusCode;
    use http::header::CONTENT_TYPE;
    use std::io::Read;

    fn encode(response: Response, coding: Option<ContentCoding>) -> BytesMut {
        let mut buf = BytesMut::new();
        ResponseEncoder::new().encode((response, coding), &mut buf).unwrap();
        buf
    }

    #[test]
    fn plain_body() {
        let buf = encode(Response::ok().with_header(CONTENT_TYPE, "text/plain").with_body("abc"), None);

        assert_eq!(&buf[..], b"HTTP/1.1 200 OK\r\ncontent-type:text/plain\r\ncontent-length:3\r\n\r\nabc");
    }

    #[test]
    fn empty_not_found() {
        let buf = encode(Response::not_found(), None);

        assert_eq!(&buf[..], b"HTTP/1.1 404 Not Found\r\ncontent-length:0\r\n\r\n");
    }

    #[test]
    fn gzip_body_and_length() {
        let body = "hello, hello, hello, hello";
        let buf = encode(Response::ok().with_header(CONTENT_TYPE, "text/plain").with_body(body), Some(ContentCoding::Gzip));

        let head_end = buf.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
        let head = std::str::from_utf8(&buf[..head_end]).unwrap();
        let encoded = &buf[head_end..];

        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("content-encoding:gzip\r\n"));
        assert!(head.contains(&format!("content-length:{}\r\n", encoded.len())));

        let mut decoded = String::new();
        GzDecoder::new(encoded).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn empty_body_is_never_compressed() {
        let buf = encode(Response::new(StatusCode::CREATED), Some(ContentCoding::Gzip));

        assert_eq!(&buf[..], b"HTTP/1.1 201 Created\r\ncontent-length:0\r\n\r\n");
    }

    #[test]
    fn stale_content_length_is_replaced() {
        let buf = encode(Response::ok().with_header("Content-Length", "99").with_body("ab"), None);

        assert_eq!(&buf[..], b"HTTP/1.1 200 OK\r\ncontent-length:2\r\n\r\nab");
    }
}
