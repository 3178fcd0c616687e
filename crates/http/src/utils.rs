//! Utility macros used internally by the protocol crate.

/// Early return with an error if a condition is not met.
///
/// Works like `assert!` but returns `Err($error)` instead of panicking, which keeps the
/// decoders free of nested `if` blocks for their limit checks.
///
/// ```ignore
/// ensure!(headers.len() <= MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
