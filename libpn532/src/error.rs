// libpn532/src/error.rs

use thiserror::Error;

/// Driver error type.
///
/// `Clone` so the card poller can fan a cycle failure out to every
/// subscriber.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bus primitive itself failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A readiness wait exceeded its bound.
    #[error("operation timed out")]
    Timeout,

    #[error("chip did not acknowledge the command")]
    AckInvalid,

    /// Checksum, length or layout violation on a reply.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed reply carrying a non-zero card status byte.
    #[error("card rejected the operation: status={status:#04x}")]
    AuthFailure { status: u8 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A caller-issued exchange was attempted while another was in flight.
    #[error("another exchange is in flight")]
    Busy,
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
