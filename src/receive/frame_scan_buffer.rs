use crate::{
    constants::MIN_BUFFER_GROWTH,
    frame::{FrameParser, ParseOutcome},
    receive::InternalError,
};
use std::ops::Range;

/// What the scan buffer needs next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// One complete frame occupies this range of the buffer. The range stays
    /// valid until the buffer is mutated again.
    Frame(Range<usize>),

    /// The buffered bytes hold only part of a frame; read more via
    /// [`FrameScanBuffer::read_slot`].
    NeedMore,

    /// The source ended cleanly on a frame boundary.
    End,
}

/// Transport-agnostic core of the frame scanner.
///
/// `FrameScanBuffer` owns the bytes read so far and decides, with the help of
/// a [`FrameParser`], where the next frame ends. It performs no I/O itself:
/// a driver calls [`scan`](Self::scan) and, on `NeedMore`, reads into the
/// slot returned by [`read_slot`](Self::read_slot) and reports the result via
/// [`commit`](Self::commit) or [`mark_eof`](Self::mark_eof).
///
/// The unconsumed bytes live in `buf[start..end]`. `buf.len()` is the
/// current capacity; it only grows inside `read_slot`, after consumed bytes
/// have been compacted away, and never past `max_frame_size`.
///
/// Once a fatal error is reported the buffer is poisoned and every later call
/// returns that same error.
#[derive(Debug)]
pub struct FrameScanBuffer {
    buf: Vec<u8>,
    start: usize,
    end: usize,
    max_frame_size: usize,
    eof: bool,
    failure: Option<InternalError>,
}

impl FrameScanBuffer {
    pub fn new(initial_size: usize, max_frame_size: usize) -> Self {
        Self {
            buf: vec![0; initial_size.min(max_frame_size)],
            start: 0,
            end: 0,
            max_frame_size,
            eof: false,
            failure: None,
        }
    }

    /// Bytes read from the source that are not yet part of a returned frame.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn is_poisoned(&self) -> bool {
        self.failure.is_some()
    }

    /// Asks `parser` whether the pending bytes begin with a complete frame.
    pub fn scan<P: FrameParser + ?Sized>(
        &mut self,
        parser: &P,
    ) -> Result<ScanStatus, InternalError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let buffered = self.end - self.start;

        if buffered == 0 && self.eof {
            return Ok(ScanStatus::End);
        }

        // Only the remainder length is kept so the parser's borrow of the
        // buffer ends here.
        let parsed = match parser.parse_frame(&self.buf[self.start..self.end]) {
            Ok(ParseOutcome::Complete { remainder, .. }) => Ok(Some(remainder.len())),
            Ok(ParseOutcome::Incomplete) => Ok(None),
            Err(err) => Err(err),
        };

        match parsed {
            Err(err) => Err(self.fail(InternalError::MalformedFrame(err))),
            Ok(None) if self.eof => Err(self.fail(InternalError::TruncatedFrame { buffered })),
            Ok(None) => Ok(ScanStatus::NeedMore),
            Ok(Some(remainder)) => {
                let Some(advance) = buffered.checked_sub(remainder) else {
                    return Err(self.fail(InternalError::BadParse {
                        remainder,
                        buffered,
                    }));
                };

                let frame = self.start..self.start + advance;
                self.start += advance;

                tracing::trace!(
                    frame_size = advance,
                    leftover = remainder,
                    "scanner delimited frame"
                );

                Ok(ScanStatus::Frame(frame))
            }
        }
    }

    /// Bytes of a frame previously reported by [`scan`](Self::scan).
    pub fn frame_bytes(&self, range: Range<usize>) -> &[u8] {
        &self.buf[range]
    }

    /// Returns writable space after the pending bytes.
    ///
    /// Consumed bytes are compacted away first. If the buffer is still full
    /// it grows (doubling, capped at `max_frame_size`); a full buffer that is
    /// already at the cap means the pending frame can never fit.
    pub fn read_slot(&mut self) -> Result<&mut [u8], InternalError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == self.buf.len() {
            if self.buf.len() >= self.max_frame_size {
                return Err(self.fail(InternalError::FrameTooLarge {
                    max_frame_size: self.max_frame_size,
                }));
            }

            let grown = self
                .buf
                .len()
                .saturating_mul(2)
                .max(MIN_BUFFER_GROWTH)
                .min(self.max_frame_size);

            tracing::trace!(from = self.buf.len(), to = grown, "growing scan buffer");
            self.buf.resize(grown, 0);
        }

        Ok(&mut self.buf[self.end..])
    }

    /// Records that `n` bytes were written into the last read slot.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(self.end + n <= self.buf.len(), "commit past read slot");
        self.end = (self.end + n).min(self.buf.len());
    }

    /// Records that the source has no more bytes.
    pub fn mark_eof(&mut self) {
        self.eof = true;
    }

    fn fail(&mut self, err: InternalError) -> InternalError {
        tracing::error!(error = %err, "frame scanner stopped");
        self.failure = Some(err.clone());
        err
    }
}
