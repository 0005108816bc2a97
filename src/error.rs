use thiserror::Error;

/// Errors raised by map operations, cursors, views and adapters.
///
/// Every variant is a local, synchronous fault: the operation that reports it
/// has not modified the map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A cursor was advanced past the last live entry.
    #[error("no such element: the cursor is exhausted")]
    NoSuchElement,

    /// The receiver is in a state where the operation is not permitted, e.g.
    /// `Cursor::remove` without a preceding `advance`.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The operation is not supported by this map flavour or view.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A constructor argument cannot be honoured.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            MapError::NoSuchElement.to_string(),
            "no such element: the cursor is exhausted"
        );
        assert_eq!(
            MapError::IllegalState("remove() called twice").to_string(),
            "illegal state: remove() called twice"
        );
        assert_eq!(
            MapError::UnsupportedOperation("put").to_string(),
            "unsupported operation: put"
        );
        assert_eq!(
            MapError::IllegalArgument("capacity 7".into()).to_string(),
            "illegal argument: capacity 7"
        );
    }
}
