use crate::frame::{FrameParseError, MessageId, PayloadKind};
use std::fmt;
use std::io;

/// Coarse classification of a [`ReceiveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveErrorKind {
    /// The underlying byte source failed.
    Transport,
    /// Framing is broken: the scanner and parser disagree, or a frame is
    /// oversized or truncated.
    Internal,
    /// Framing is sound but the peer violated the message sequencing rules.
    Protocol,
}

/// Broken invariants between the byte source, the scanner and the parser.
///
/// None of these are recoverable for the current stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A frame needs more room than the scanner's maximum buffer size.
    FrameTooLarge { max_frame_size: usize },

    /// The parser rejected the buffered bytes while scanning for a boundary.
    MalformedFrame(FrameParseError),

    /// The parser returned a remainder longer than the input it was given.
    BadParse { remainder: usize, buffered: usize },

    /// The source ended partway through a frame.
    TruncatedFrame { buffered: usize },

    /// Re-parsing a scanner-delimited frame failed.
    ReparseFailed(FrameParseError),

    /// Re-parsing a scanner-delimited frame reported it as incomplete.
    ReparseIncomplete,

    /// Re-parsing a scanner-delimited frame left bytes over.
    TrailingBytes { remaining: usize },

    /// A frame's payload does not match the length declared in its header.
    LengthMismatch { declared: u32, actual: usize },
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::FrameTooLarge { max_frame_size } => {
                write!(f, "frame exceeds maximum size of {max_frame_size} bytes")
            }
            InternalError::MalformedFrame(err) => write!(f, "malformed frame: {err}"),
            InternalError::BadParse {
                remainder,
                buffered,
            } => write!(
                f,
                "bad parse: remainder of {remainder} bytes from {buffered} buffered bytes"
            ),
            InternalError::TruncatedFrame { buffered } => {
                write!(f, "stream ended with {buffered} bytes of a partial frame")
            }
            InternalError::ReparseFailed(err) => {
                write!(f, "delimited frame failed to parse: {err}")
            }
            InternalError::ReparseIncomplete => {
                write!(f, "invalid data returned from scanner")
            }
            InternalError::TrailingBytes { remaining } => {
                write!(f, "{remaining} bytes remaining after parsing frame")
            }
            InternalError::LengthMismatch { declared, actual } => write!(
                f,
                "frame data length {actual} does not match header length {declared}"
            ),
        }
    }
}

impl std::error::Error for InternalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InternalError::MalformedFrame(e) | InternalError::ReparseFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Sequencing rules violated by the remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A non-starting frame arrived for an id with no message in flight.
    UnknownMessageId { id: MessageId },

    /// A starting frame arrived for an id that already has a message in flight.
    DuplicateStart { id: MessageId },

    /// A frame's kind differs from the kind its message started with.
    KindChanged {
        id: MessageId,
        expected: PayloadKind,
        actual: PayloadKind,
    },

    /// Starting another message would exceed the in-flight limit.
    TooManyInFlight { limit: usize },

    /// A message grew past the configured size limit.
    MessageTooLarge { id: MessageId, limit: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownMessageId { id } => {
                write!(f, "unknown message id {id} with no starting bit")
            }
            ProtocolError::DuplicateStart { id } => {
                write!(f, "starting frame for message id {id} which is already in flight")
            }
            ProtocolError::KindChanged {
                id,
                expected,
                actual,
            } => write!(
                f,
                "payload kind changed for in flight message {id}: {expected:?} -> {actual:?}"
            ),
            ProtocolError::TooManyInFlight { limit } => {
                write!(f, "more than {limit} messages in flight")
            }
            ProtocolError::MessageTooLarge { id, limit } => {
                write!(f, "message {id} exceeds {limit} bytes")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Errors returned while reading messages off a stream.
///
/// Any error aborts the read in progress. The receiver should be discarded
/// afterwards; resuming is not guaranteed to be meaningful.
#[derive(Debug)]
pub enum ReceiveError {
    Io(io::Error),
    Internal(InternalError),
    Protocol(ProtocolError),
}

impl ReceiveError {
    pub fn kind(&self) -> ReceiveErrorKind {
        match self {
            ReceiveError::Io(_) => ReceiveErrorKind::Transport,
            ReceiveError::Internal(_) => ReceiveErrorKind::Internal,
            ReceiveError::Protocol(_) => ReceiveErrorKind::Protocol,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ReceiveError::Internal(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, ReceiveError::Protocol(_))
    }
}

impl fmt::Display for ReceiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiveError::Io(e) => write!(f, "I/O error: {e}"),
            ReceiveError::Internal(e) => write!(f, "internal error: {e}"),
            ReceiveError::Protocol(e) => write!(f, "protocol error: {e}"),
        }
    }
}

impl std::error::Error for ReceiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiveError::Io(e) => Some(e),
            ReceiveError::Internal(e) => Some(e),
            ReceiveError::Protocol(e) => Some(e),
        }
    }
}

impl From<io::Error> for ReceiveError {
    fn from(e: io::Error) -> Self {
        ReceiveError::Io(e)
    }
}

impl From<InternalError> for ReceiveError {
    fn from(e: InternalError) -> Self {
        ReceiveError::Internal(e)
    }
}

impl From<ProtocolError> for ReceiveError {
    fn from(e: ProtocolError) -> Self {
        ReceiveError::Protocol(e)
    }
}
