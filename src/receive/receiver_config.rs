use crate::constants::{DEFAULT_INITIAL_BUFFER_SIZE, DEFAULT_MAX_FRAME_SIZE};

/// Tunables for a `Receiver`.
///
/// The defaults reproduce the unbounded behavior: only the frame size is
/// capped. `max_in_flight` and `max_message_size` bound the reassembly state
/// a misbehaving peer can make the receiver hold on to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverConfig {
    /// Capacity the scan buffer starts out with.
    pub initial_buffer_size: usize,

    /// Largest encoded frame the scanner will buffer.
    pub max_frame_size: usize,

    /// Maximum number of messages that may be in flight at once.
    pub max_in_flight: Option<usize>,

    /// Maximum reassembled payload size of a single message.
    pub max_message_size: Option<usize>,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_in_flight: None,
            max_message_size: None,
        }
    }
}

impl ReceiverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    pub fn with_max_frame_size(mut self, size: usize) -> Self {
        self.max_frame_size = size;
        self
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    pub fn with_max_message_size(mut self, limit: usize) -> Self {
        self.max_message_size = Some(limit);
        self
    }

    /// Initial buffer size, clamped so it never exceeds the frame cap.
    pub fn effective_initial_buffer_size(&self) -> usize {
        self.initial_buffer_size.min(self.max_frame_size)
    }
}
