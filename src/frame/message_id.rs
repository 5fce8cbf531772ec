use std::fmt;

/// Identifies the logical message a frame belongs to.
///
/// Every frame of one logical message carries the same `MessageId`. The value
/// is opaque: it is only ever compared for equality and used as a map key
/// while the message is being reassembled. Once a message completes, its id
/// may be reused by a later message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        MessageId(value)
    }
}
