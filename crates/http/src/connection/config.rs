use std::time::Duration;

use crate::codec::DEFAULT_MAX_BODY_BYTES;

/// Per-connection limits.
///
/// Deadlines default to `None`: a connection waits on its peer for as long as it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Upper bound on the time spent reading one complete request
    pub read_timeout: Option<Duration>,
    /// Upper bound on the time spent writing and flushing the response
    pub write_timeout: Option<Duration>,
    /// Largest request body accepted before answering `413 Payload Too Large`
    pub max_body_bytes: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { read_timeout: None, write_timeout: None, max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }
}
