use crate::frame::PayloadKind;

/// A fully reassembled logical message.
///
/// Framing metadata (message id, starting/continuation flags, per-frame
/// lengths) only matters while frames are being stitched together, so it is
/// stripped before the message is handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: PayloadKind,
    pub data: Vec<u8>,
}

impl Message {
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}
