use crate::{
    frame::FrameParser,
    receive::{FrameScanBuffer, ReceiveError, ReceiverConfig, ScanStatus},
};
use std::io::{self, Read};

/// Splits a blocking byte source into frame-sized byte slices.
///
/// Each call to [`next_frame`](Self::next_frame) returns exactly the bytes of
/// one encoded frame, as delimited by the parser. Reads are issued only when
/// the parser reports that the buffered bytes are incomplete, and bytes past
/// the frame boundary are kept for the next call.
pub struct FrameScanner<R> {
    reader: R,
    buffer: FrameScanBuffer,
}

impl<R: Read> FrameScanner<R> {
    pub fn new(reader: R, initial_size: usize, max_frame_size: usize) -> Self {
        Self {
            reader,
            buffer: FrameScanBuffer::new(initial_size, max_frame_size),
        }
    }

    pub fn with_config(reader: R, config: &ReceiverConfig) -> Self {
        Self::new(
            reader,
            config.effective_initial_buffer_size(),
            config.max_frame_size,
        )
    }

    /// Returns the next frame's bytes, or `None` once the source ended on a
    /// frame boundary.
    ///
    /// The returned slice borrows the scanner's buffer and is valid until the
    /// next call.
    pub fn next_frame<P: FrameParser + ?Sized>(
        &mut self,
        parser: &P,
    ) -> Result<Option<&[u8]>, ReceiveError> {
        loop {
            match self.buffer.scan(parser)? {
                ScanStatus::Frame(range) => return Ok(Some(self.buffer.frame_bytes(range))),
                ScanStatus::End => return Ok(None),
                ScanStatus::NeedMore => self.fill()?,
            }
        }
    }

    fn fill(&mut self) -> Result<(), ReceiveError> {
        let slot = self.buffer.read_slot()?;

        let n = loop {
            match self.reader.read(slot) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReceiveError::Io(e)),
            }
        };

        if n == 0 {
            self.buffer.mark_eof();
        } else {
            self.buffer.commit(n);
        }

        Ok(())
    }

    pub fn buffer(&self) -> &FrameScanBuffer {
        &self.buffer
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
