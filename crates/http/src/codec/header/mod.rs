//! Request head decoding and message head encoding.
//!
//! - [`HeaderDecoder`]: parses the request line and header section
//! - [`HeaderEncoder`]: writes a response status line and its headers

mod header_decoder;
mod header_encoder;

pub use header_decoder::{HeaderDecoder, RequestHead};
pub use header_encoder::HeaderEncoder;
pub(crate) use header_encoder::{version_str, write_head};
