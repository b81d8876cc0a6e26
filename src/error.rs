use std::io;

use crate::filter::FilterState;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the conversion pipeline.
///
/// Every error is reported synchronously to the call that triggered it. Output already forwarded
/// downstream before the error stays valid; nothing is retracted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A configuration value is outside the range documented for it.
    #[error("invalid value for `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending option or argument.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The backend could not allocate its working state.
    #[error("backend could not allocate its working state: {0}")]
    ResourceExhausted(String),

    /// A backend call reported failure.
    #[error("backend fault ({code}): {message}")]
    BackendFault {
        /// Backend specific error code, `-1` when the backend does not provide one.
        code: i64,
        /// Backend supplied description.
        message: String,
    },

    /// The backend broke the adapter contract, e.g. by reporting no progress with pending input.
    #[error("backend protocol violation: {0}")]
    ProtocolViolation(String),

    /// A buffer did not have the room an internal operation required.
    #[error("buffer overflow: {requested} bytes requested, {available} available")]
    BufferOverflow {
        /// Bytes the operation needed.
        requested: usize,
        /// Bytes the buffer had room for.
        available: usize,
    },

    /// A buffer was reset while it still held bytes nobody had consumed.
    #[error("buffer still holds {unread} unread bytes")]
    UnreadData {
        /// Bytes that would have been discarded.
        unread: usize,
    },

    /// The operation is not legal in the filter's current lifecycle state.
    #[error("`{operation}` is not allowed while the filter is {state:?}")]
    IllegalState {
        /// The attempted operation.
        operation: &'static str,
        /// The state the filter was in.
        state: FilterState,
    },

    /// The downstream consumer failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn backend(code: i64, message: impl Into<String>) -> Self {
        Self::BackendFault {
            code,
            message: message.into(),
        }
    }

    /// Wraps an error returned by a backend crate that only speaks `std::io`.
    pub(crate) fn backend_io(err: io::Error) -> Self {
        let code = err.raw_os_error().map_or(-1, i64::from);
        match err.kind() {
            io::ErrorKind::OutOfMemory => Self::ResourceExhausted(err.to_string()),
            _ => Self::backend(code, err.to_string()),
        }
    }

    pub(crate) fn uninitialized(codec: &str) -> Self {
        Self::ProtocolViolation(format!("{codec} backend used before init"))
    }

    pub(crate) fn truncated(codec: &str) -> Self {
        Self::backend(-1, format!("{codec} stream ended before it was complete"))
    }

    pub(crate) fn trailing(codec: &str) -> Self {
        Self::backend(-1, format!("extra data after end of {codec} stream"))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err {
            Error::Io(inner) => return inner,
            Error::InvalidArgument { .. } => io::ErrorKind::InvalidInput,
            Error::ResourceExhausted(_) => io::ErrorKind::OutOfMemory,
            Error::BackendFault { .. } => io::ErrorKind::InvalidData,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
