#![allow(dead_code)]

use muxwire::frame::{Frame, FrameCodec, MessageId, PayloadKind};
use std::io::{self, Read};

/// Serializes frames back to back, as they would appear on the wire.
pub fn encode_all(frames: &[Frame]) -> Vec<u8> {
    frames.iter().flat_map(FrameCodec::encode).collect()
}

/// Splits `data` into one starting frame, continuation frames and a
/// terminating frame, each carrying at most `chunk` bytes.
pub fn fragment(id: u64, kind: PayloadKind, data: &[u8], chunk: usize) -> Vec<Frame> {
    let chunks: Vec<&[u8]> = if data.is_empty() {
        vec![data]
    } else {
        data.chunks(chunk).collect()
    };

    let last = chunks.len() - 1;

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, bytes)| Frame::new(MessageId(id), kind, i == 0, i != last, bytes))
        .collect()
}

/// Hands out at most `chunk` bytes per read call.
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self
            .chunk
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Serves its bytes, then fails every further read.
pub struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: io::Cursor::new(data),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset")),
            n => Ok(n),
        }
    }
}
