use crate::{
    constants::{
        FRAME_FLAG_CONTINUATION, FRAME_FLAG_STARTING, FRAME_FLAGS_KNOWN, FRAME_FLAGS_OFFSET,
        FRAME_HEADER_SIZE, FRAME_KIND_OFFSET, FRAME_LENGTH_FIELD_SIZE, FRAME_MESSAGE_ID_OFFSET,
    },
    frame::{Frame, FrameParseError, FrameParser, MessageId, ParseOutcome, PayloadKind},
};

/// Reference wire encoding for frames.
///
/// The `FrameCodec` serializes a `Frame` into a fixed little-endian header
/// followed by its payload, and parses that layout back out of a byte buffer:
///
/// ```text
/// [0..4)    payload length (u32)
/// [4..12)   message id (u64)
/// [12]      payload kind (u8)
/// [13]      flags (bit 0 = starting, bit 1 = continuation)
/// [14..)    payload
/// ```
///
/// Parsing follows the [`FrameParser`] contract, so the codec can be handed
/// directly to a `Receiver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes a `Frame` into a byte vector.
    ///
    /// The length field is always derived from `frame.data`, so the output
    /// is well-formed even if `frame.length` was set inconsistently.
    pub fn encode(frame: &Frame) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + frame.data.len());

        let mut flags = 0u8;
        if frame.starting {
            flags |= FRAME_FLAG_STARTING;
        }
        if frame.continuation {
            flags |= FRAME_FLAG_CONTINUATION;
        }

        buf.extend(&(frame.data.len() as u32).to_le_bytes());
        buf.extend(&frame.id.0.to_le_bytes());
        buf.push(frame.kind as u8);
        buf.push(flags);
        buf.extend(&frame.data);

        buf
    }

    /// Decodes the first frame in `buf`.
    ///
    /// Header fields are validated as soon as the header is available, so a
    /// corrupt header is reported without waiting for its payload to arrive.
    pub fn decode(buf: &[u8]) -> Result<ParseOutcome<'_>, FrameParseError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Ok(ParseOutcome::Incomplete);
        }

        let len = u32::from_le_bytes(
            buf[..FRAME_LENGTH_FIELD_SIZE]
                .try_into()
                .map_err(|_| FrameParseError::CorruptFrame)?,
        );

        let id = u64::from_le_bytes(
            buf[FRAME_MESSAGE_ID_OFFSET..FRAME_KIND_OFFSET]
                .try_into()
                .map_err(|_| FrameParseError::CorruptFrame)?,
        );

        let kind = PayloadKind::try_from(buf[FRAME_KIND_OFFSET])
            .map_err(FrameParseError::UnknownPayloadKind)?;

        let flags = buf[FRAME_FLAGS_OFFSET];
        if flags & !FRAME_FLAGS_KNOWN != 0 {
            return Err(FrameParseError::ReservedFlagBits(flags));
        }

        let total = FRAME_HEADER_SIZE
            .checked_add(len as usize)
            .ok_or(FrameParseError::CorruptFrame)?;

        if buf.len() < total {
            return Ok(ParseOutcome::Incomplete);
        }

        let frame = Frame {
            id: MessageId(id),
            kind,
            starting: flags & FRAME_FLAG_STARTING != 0,
            continuation: flags & FRAME_FLAG_CONTINUATION != 0,
            length: len,
            data: buf[FRAME_HEADER_SIZE..total].to_vec(),
        };

        Ok(ParseOutcome::Complete {
            frame,
            remainder: &buf[total..],
        })
    }
}

impl FrameParser for FrameCodec {
    fn parse_frame<'a>(&self, buf: &'a [u8]) -> Result<ParseOutcome<'a>, FrameParseError> {
        FrameCodec::decode(buf)
    }
}
