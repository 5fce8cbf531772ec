use std::fmt;

/// Reasons a frame parser rejects its input as malformed.
///
/// A parse error means there is no valid frame boundary at the current
/// position. It is never used for "not enough bytes yet"; that case is
/// reported as [`ParseOutcome::Incomplete`](crate::frame::ParseOutcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameParseError {
    /// The header names a payload kind outside the known set.
    UnknownPayloadKind(u8),

    /// The header sets flag bits that are reserved.
    ReservedFlagBits(u8),

    /// Any other structural corruption detected by a parser.
    CorruptFrame,
}

impl fmt::Display for FrameParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameParseError::UnknownPayloadKind(kind) => {
                write!(f, "unknown payload kind: {kind}")
            }
            FrameParseError::ReservedFlagBits(flags) => {
                write!(f, "reserved flag bits set: {flags:#010b}")
            }
            FrameParseError::CorruptFrame => write!(f, "corrupt frame"),
        }
    }
}

impl std::error::Error for FrameParseError {}
