use crate::{
    frame::{Frame, FrameParser, MessageId, ParseOutcome, PayloadKind},
    receive::{InternalError, Message, ProtocolError, ReceiveError, ReceiverConfig},
};
use std::collections::HashMap;

/// Accumulated state of a message that has started but not yet completed.
#[derive(Debug)]
struct PendingMessage {
    kind: PayloadKind,
    buffered: Vec<u8>,
}

/// Stitches interleaved frames back into complete messages.
///
/// The reassembler keeps one pending entry per message id that has seen its
/// starting frame but not yet its terminating frame. Each id moves through
///
/// ```text
/// Absent --starting--> InFlight --continuation--> InFlight --terminating--> Absent
/// ```
///
/// and any frame that does not fit that shape is a [`ProtocolError`]. Frames
/// of different ids may be interleaved arbitrarily; each id's payload is the
/// concatenation of its own frames in arrival order.
///
/// Completing a message of kind [`PayloadKind::Error`] cancels the stream's
/// other in-flight messages: their pending state is dropped, and any further
/// frames for them are rejected as unknown.
///
/// The reassembler performs no I/O, so it can be driven by any front-end.
#[derive(Debug, Default)]
pub struct Reassembler {
    pending: HashMap<MessageId, PendingMessage>,
    max_in_flight: Option<usize>,
    max_message_size: Option<usize>,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ReceiverConfig) -> Self {
        Self {
            pending: HashMap::new(),
            max_in_flight: config.max_in_flight,
            max_message_size: config.max_message_size,
        }
    }

    /// Number of messages currently in flight.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn is_in_flight(&self, id: MessageId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Re-parses one scanner-delimited frame and feeds it to [`accept`](Self::accept).
    ///
    /// `bytes` must hold exactly one encoded frame. Anything else means the
    /// scanner and the parser disagree about frame boundaries, which is
    /// reported as an [`InternalError`].
    pub fn accept_frame_bytes<P: FrameParser + ?Sized>(
        &mut self,
        parser: &P,
        bytes: &[u8],
    ) -> Result<Option<Message>, ReceiveError> {
        let frame = parse_delimited(parser, bytes)?;
        Ok(self.accept(frame)?)
    }

    /// Applies one frame, returning the message it completes, if any.
    pub fn accept(&mut self, frame: Frame) -> Result<Option<Message>, ProtocolError> {
        tracing::trace!(
            id = %frame.id,
            kind = ?frame.kind,
            starting = frame.starting,
            continuation = frame.continuation,
            length = frame.length,
            "frame received"
        );

        let Frame {
            id,
            kind,
            starting,
            continuation,
            data,
            ..
        } = frame;

        let prior = match (self.pending.remove(&id), starting) {
            (None, false) => return Err(self.violation(ProtocolError::UnknownMessageId { id })),
            (Some(state), true) => {
                self.pending.insert(id, state);
                return Err(self.violation(ProtocolError::DuplicateStart { id }));
            }
            (Some(state), false) if state.kind != kind => {
                let expected = state.kind;
                self.pending.insert(id, state);
                return Err(self.violation(ProtocolError::KindChanged {
                    id,
                    expected,
                    actual: kind,
                }));
            }
            (Some(state), false) => state.buffered,
            (None, true) => {
                if let Some(limit) = self.max_in_flight {
                    // The terminating frame of a single-frame message never
                    // occupies a slot.
                    if continuation && self.pending.len() >= limit {
                        return Err(self.violation(ProtocolError::TooManyInFlight { limit }));
                    }
                }
                Vec::new()
            }
        };

        let mut buffered = prior;
        buffered.extend_from_slice(&data);

        if let Some(limit) = self.max_message_size {
            if buffered.len() > limit {
                return Err(self.violation(ProtocolError::MessageTooLarge { id, limit }));
            }
        }

        if continuation {
            self.pending.insert(id, PendingMessage { kind, buffered });
            return Ok(None);
        }

        tracing::debug!(%id, ?kind, size = buffered.len(), "message reassembled");

        if kind.is_error() {
            self.cancel_in_flight(id);
        }

        Ok(Some(Message {
            kind,
            data: buffered,
        }))
    }

    /// Drops every pending message. An error message terminates the whole
    /// stream's in-flight work, not only its own id.
    fn cancel_in_flight(&mut self, error_id: MessageId) {
        if self.pending.is_empty() {
            return;
        }

        let canceled: Vec<MessageId> = self.pending.drain().map(|(id, _)| id).collect();

        tracing::debug!(
            %error_id,
            canceled = canceled.len(),
            ids = ?canceled,
            "error message canceled in-flight messages"
        );
    }

    fn violation(&self, err: ProtocolError) -> ProtocolError {
        tracing::warn!(error = %err, in_flight = self.pending.len(), "protocol violation");
        err
    }

    /// Ids of messages still in flight, in no particular order.
    pub fn in_flight_ids(&self) -> impl Iterator<Item = MessageId> + '_ {
        self.pending.keys().copied()
    }
}

/// Parses bytes that the scanner already delimited as a single frame.
fn parse_delimited<P: FrameParser + ?Sized>(
    parser: &P,
    bytes: &[u8],
) -> Result<Frame, InternalError> {
    let (frame, remaining) = match parser.parse_frame(bytes) {
        Err(err) => return Err(InternalError::ReparseFailed(err)),
        Ok(ParseOutcome::Incomplete) => return Err(InternalError::ReparseIncomplete),
        Ok(ParseOutcome::Complete { frame, remainder }) => (frame, remainder.len()),
    };

    if remaining != 0 {
        return Err(InternalError::TrailingBytes { remaining });
    }

    if frame.data.len() != frame.length as usize {
        return Err(InternalError::LengthMismatch {
            declared: frame.length,
            actual: frame.data.len(),
        });
    }

    Ok(frame)
}
