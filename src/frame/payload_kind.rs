use std::convert::TryFrom;

/// Application-level category of a message's payload.
///
/// All frames of one logical message share the same kind, established by its
/// starting frame. `Error` is special: completing an `Error` message cancels
/// every other message still in flight on the same stream.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Invoke = 1,
    Message = 2,
    Error = 3,
    Cancel = 4,
    Close = 5,
    CloseSend = 6,
    InvokeMetadata = 7,
}

impl PayloadKind {
    pub fn is_error(self) -> bool {
        self == PayloadKind::Error
    }
}

impl TryFrom<u8> for PayloadKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            1 => Ok(PayloadKind::Invoke),
            2 => Ok(PayloadKind::Message),
            3 => Ok(PayloadKind::Error),
            4 => Ok(PayloadKind::Cancel),
            5 => Ok(PayloadKind::Close),
            6 => Ok(PayloadKind::CloseSend),
            7 => Ok(PayloadKind::InvokeMetadata),
            other => Err(other),
        }
    }
}
