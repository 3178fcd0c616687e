/// How the request body is delimited on the wire.
///
/// Chunked transfer-encoding is not supported, so a request either announces its length
/// or carries whatever bytes arrived together with its header section.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Body with a `content-length` announced length in bytes
    Length(u64),
    /// No `content-length`: the body is the bytes already buffered after the blank line
    Unframed,
}
