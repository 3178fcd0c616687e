//! Core HTTP protocol types.
//!
//! # Components
//!
//! - [`Headers`]: ordered, case-insensitive header container shared by requests and responses
//! - [`Request`]: a parsed request with its body fully buffered
//! - [`Response`]: a handler-built response, before content-encoding
//! - [`PayloadSize`]: how a request body is delimited on the wire
//! - Errors:
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response sending errors
//!
//! Every value here is owned by exactly one connection; nothing is shared across tasks.

mod headers;
pub use headers::Headers;

mod payload;
pub use payload::PayloadSize;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
