//! Content-coding negotiation and body compression.

use std::io;
use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::trace;

/// A content coding the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    /// Gzip encoding.
    Gzip,
}

impl ContentCoding {
    /// Looks up a coding by its `accept-encoding` token.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("gzip") { Some(Self::Gzip) } else { None }
    }

    /// Selects a coding based on the `accept-encoding` header.
    ///
    /// Tokens are tried in the order the client listed them and the first supported one
    /// wins. Parameters after `;` are ignored, except that `q=0` rules a token out.
    pub fn negotiate(accept_encodings: Option<&str>) -> Option<Self> {
        accept_encodings?.split(',').find_map(|item| {
            let mut parts = item.split(';');
            let token = parts.next()?.trim();
            if parts.any(is_zero_quality) {
                return None;
            }
            Self::from_token(token)
        })
    }

    /// Returns the name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
        }
    }

    /// Compresses `data` as a whole.
    ///
    /// # Errors
    ///
    /// Returns the underlying compressor error.
    pub fn encode(self, data: &[u8]) -> io::Result<Bytes> {
        match self {
            Self::Gzip => {
                let mut encoder = GzEncoder::new(BytesMut::with_capacity(data.len() / 2).writer(), Compression::default());
                encoder.write_all(data).inspect_err(|err| trace!("Error encoding gzip encoding: {}", err))?;
                Ok(encoder.finish()?.into_inner().freeze())
            }
        }
    }
}

fn is_zero_quality(param: &str) -> bool {
    let Some((name, value)) = param.split_once('=') else {
        return false;
    };
    name.trim().eq_ignore_ascii_case("q") && value.trim().parse::<f32>().is_ok_and(|q| q <= 0.0)
}
