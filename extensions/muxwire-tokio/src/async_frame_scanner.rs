use muxwire::{
    frame::FrameParser,
    receive::{FrameScanBuffer, ReceiveError, ReceiverConfig, ScanStatus},
};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Async counterpart of [`muxwire::receive::FrameScanner`].
///
/// Shares the same [`FrameScanBuffer`], so boundary detection, buffer growth
/// and failure handling are identical; only the reads are awaited.
pub struct AsyncFrameScanner<R> {
    reader: R,
    buffer: FrameScanBuffer,
}

impl<R: AsyncRead + Unpin> AsyncFrameScanner<R> {
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
    pub async fn next_frame<P: FrameParser + ?Sized>(
        &mut self,
        parser: &P,
    ) -> Result<Option<&[u8]>, ReceiveError> {
        loop {
            match self.buffer.scan(parser)? {
                ScanStatus::Frame(range) => return Ok(Some(self.buffer.frame_bytes(range))),
                ScanStatus::End => return Ok(None),
                ScanStatus::NeedMore => self.fill().await?,
            }
        }
    }

    async fn fill(&mut self) -> Result<(), ReceiveError> {
        let slot = self.buffer.read_slot()?;

        let n = loop {
            match self.reader.read(slot).await {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReceiveError::Io(e)),
            }
        };

        if n == 0 {
            tracing::trace!("source reached end of stream");
            self.buffer.mark_eof();
        } else {
            self.buffer.commit(n);
        }

        Ok(())
    }

    pub fn buffer(&self) -> &FrameScanBuffer {
        &self.buffer
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
