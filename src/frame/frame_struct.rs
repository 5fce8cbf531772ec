use crate::frame::{MessageId, PayloadKind};

/// A single unit of data on the wire.
///
/// A frame carries one chunk of a logical message's payload together with the
/// metadata needed to reassemble it: the message it belongs to, the payload
/// kind, and whether it opens and/or continues that message.
///
/// A single frame is not necessarily a single chunk of transport data;
/// multiple frames or even portions of frames may arrive in one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The logical message this frame contributes to.
    pub id: MessageId,

    /// Payload category. Must match the kind set by the message's starting frame.
    pub kind: PayloadKind,

    /// Set on the first frame of a logical message.
    pub starting: bool,

    /// Set on every frame of a logical message except the terminating one.
    ///
    /// A frame may be both starting and terminating, in which case the whole
    /// message fits in that one frame.
    pub continuation: bool,

    /// Declared payload length, as carried in the frame header.
    pub length: u32,

    /// Raw payload bytes. `data.len()` always equals `length` for frames
    /// produced by a well-behaved parser.
    pub data: Vec<u8>,
}

impl Frame {
    /// Builds a frame whose `length` is derived from `data`.
    pub fn new(
        id: MessageId,
        kind: PayloadKind,
        starting: bool,
        continuation: bool,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        let data = data.into();

        Self {
            id,
            kind,
            starting,
            continuation,
            length: data.len() as u32,
            data,
        }
    }

    /// A frame that starts and ends a message on its own.
    pub fn single(id: MessageId, kind: PayloadKind, data: impl Into<Vec<u8>>) -> Self {
        Self::new(id, kind, true, false, data)
    }

    pub fn is_terminating(&self) -> bool {
        !self.continuation
    }
}
