use crate::{
    frame::{FrameCodec, FrameParser},
    receive::{FrameScanner, Message, Reassembler, ReceiveError, ReceiverConfig},
};
use std::io::Read;

/// Reads complete logical messages from a blocking byte source.
///
/// `Receiver` ties a [`FrameScanner`] to a [`Reassembler`]: it pulls one
/// frame at a time off the stream and feeds it to the reassembler until a
/// message completes. Partially received messages stay buffered across calls,
/// so each call picks up exactly where the previous one left off.
///
/// A receiver drains a single stream and is driven by a single caller;
/// `read_message` takes `&mut self` and there is no internal locking.
/// Independent streams use independent receivers.
///
/// There is no internal timeout. To abandon a blocked read, close or shut
/// down the underlying source; the failure surfaces as end-of-stream or an
/// I/O error.
pub struct Receiver<R, P = FrameCodec> {
    scanner: FrameScanner<R>,
    parser: P,
    reassembler: Reassembler,
    terminated: bool,
}

impl<R: Read> Receiver<R, FrameCodec> {
    /// Creates a receiver using the reference [`FrameCodec`] and default limits.
    pub fn new(reader: R) -> Self {
        Self::with_parser(reader, FrameCodec, ReceiverConfig::default())
    }

    pub fn with_config(reader: R, config: ReceiverConfig) -> Self {
        Self::with_parser(reader, FrameCodec, config)
    }
}

impl<R: Read, P: FrameParser> Receiver<R, P> {
    pub fn with_parser(reader: R, parser: P, config: ReceiverConfig) -> Self {
        Self {
            scanner: FrameScanner::with_config(reader, &config),
            parser,
            reassembler: Reassembler::with_config(&config),
            terminated: false,
        }
    }

    /// Reads the next complete message.
    ///
    /// Returns `Ok(None)` once the stream ends on a frame boundary. Messages
    /// still in flight at that point are abandoned. On error no partial
    /// message is returned and the receiver should be discarded.
    pub fn read_message(&mut self) -> Result<Option<Message>, ReceiveError> {
        loop {
            let Some(bytes) = self.scanner.next_frame(&self.parser)? else {
                if self.reassembler.in_flight() > 0 {
                    tracing::debug!(
                        abandoned = self.reassembler.in_flight(),
                        "stream ended with messages in flight"
                    );
                }
                return Ok(None);
            };

            if let Some(message) = self.reassembler.accept_frame_bytes(&self.parser, bytes)? {
                return Ok(Some(message));
            }
        }
    }

    /// Number of messages that have started but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.reassembler.in_flight()
    }

    pub fn reassembler(&self) -> &Reassembler {
        &self.reassembler
    }

    pub fn get_ref(&self) -> &R {
        self.scanner.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }
}

/// Yields messages until the stream ends or the first error.
impl<R: Read, P: FrameParser> Iterator for Receiver<R, P> {
    type Item = Result<Message, ReceiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminated {
            return None;
        }

        let item = self.read_message().transpose();

        if !matches!(item, Some(Ok(_))) {
            self.terminated = true;
        }

        item
    }
}
