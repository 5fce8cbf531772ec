use crate::frame::{Frame, FrameParseError};

/// Result of a successful (non-malformed) parse attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseOutcome<'a> {
    /// The buffer holds only a prefix of a frame; more bytes are needed.
    Incomplete,

    /// Exactly one frame was decoded from a prefix of the buffer.
    ///
    /// `remainder` is the unconsumed tail, i.e. `buffer[advance..]` where
    /// `advance` is the encoded size of `frame`.
    Complete { frame: Frame, remainder: &'a [u8] },
}

/// Determines frame boundaries within a byte buffer.
///
/// The buffer handed to `parse_frame` may contain zero, one or several
/// encoded frames, possibly followed by a trailing partial frame. An
/// implementation decodes at most the first frame:
///
/// - `Err(_)`: the input is malformed at this position.
/// - `Ok(ParseOutcome::Incomplete)`: the input is a valid but incomplete prefix.
/// - `Ok(ParseOutcome::Complete { .. })`: one frame was decoded, and
///   `frame.data.len() == frame.length as usize`.
///
/// Implementations must be pure and deterministic: the same input always
/// yields the same outcome, and no state is retained between calls.
pub trait FrameParser {
    fn parse_frame<'a>(&self, buf: &'a [u8]) -> Result<ParseOutcome<'a>, FrameParseError>;
}

impl<P: FrameParser + ?Sized> FrameParser for &P {
    fn parse_frame<'a>(&self, buf: &'a [u8]) -> Result<ParseOutcome<'a>, FrameParseError> {
        (**self).parse_frame(buf)
    }
}
