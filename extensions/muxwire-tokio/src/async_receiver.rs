use crate::AsyncFrameScanner;
use futures::Stream;
use muxwire::{
    frame::{FrameCodec, FrameParser},
    receive::{Message, Reassembler, ReceiveError, ReceiverConfig},
};
use tokio::io::AsyncRead;

/// Reads complete logical messages from an async byte source.
///
/// Behaves exactly like [`muxwire::receive::Receiver`]; reads are awaited
/// instead of blocking. Dropping a pending `read_message` future abandons the
/// read but leaves already buffered bytes in place.
pub struct AsyncReceiver<R, P = FrameCodec> {
    scanner: AsyncFrameScanner<R>,
    parser: P,
    reassembler: Reassembler,
}

impl<R: AsyncRead + Unpin> AsyncReceiver<R, FrameCodec> {
    pub fn new(reader: R) -> Self {
        Self::with_parser(reader, FrameCodec, ReceiverConfig::default())
    }

    pub fn with_config(reader: R, config: ReceiverConfig) -> Self {
        Self::with_parser(reader, FrameCodec, config)
    }
}

impl<R: AsyncRead + Unpin, P: FrameParser> AsyncReceiver<R, P> {
    pub fn with_parser(reader: R, parser: P, config: ReceiverConfig) -> Self {
        Self {
            scanner: AsyncFrameScanner::with_config(reader, &config),
            parser,
            reassembler: Reassembler::with_config(&config),
        }
    }

    /// Reads the next complete message, or `None` at a clean end of stream.
    pub async fn read_message(&mut self) -> Result<Option<Message>, ReceiveError> {
        loop {
            let Some(bytes) = self.scanner.next_frame(&self.parser).await? else {
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

    pub fn in_flight(&self) -> usize {
        self.reassembler.in_flight()
    }

    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }

    /// Converts the receiver into a stream of messages.
    ///
    /// The stream ends at a clean end of stream, or right after yielding the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Message, ReceiveError>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut receiver = state?;

            match receiver.read_message().await {
                Ok(Some(message)) => Some((Ok(message), Some(receiver))),
                Ok(None) => None,
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}
