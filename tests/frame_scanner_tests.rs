mod common;

use common::{ChunkedReader, FailingReader, encode_all, fragment};
use muxwire::{
    frame::{Frame, FrameCodec, FrameParseError, FrameParser, MessageId, ParseOutcome, PayloadKind},
    receive::{FrameScanner, InternalError, ReceiveError, ReceiveErrorKind},
};
use std::io::{self, Cursor, Read};

#[test]
fn yields_each_frame_exactly() {
    let frames = fragment(1, PayloadKind::Message, b"hello world", 4);
    let wire = encode_all(&frames);

    let mut scanner = FrameScanner::new(Cursor::new(wire), 1024, 4096);

    for frame in &frames {
        let bytes = scanner
            .next_frame(&FrameCodec)
            .expect("scan failed")
            .expect("missing frame")
            .to_vec();
        assert_eq!(bytes, FrameCodec::encode(frame));
    }

    assert!(scanner.next_frame(&FrameCodec).unwrap().is_none());
}

#[test]
fn byte_at_a_time_reads_produce_the_same_frames() {
    let frames = fragment(3, PayloadKind::Invoke, b"split me into many small reads", 5);
    let wire = encode_all(&frames);

    let mut scanner = FrameScanner::new(ChunkedReader::new(wire, 1), 8, 4096);
    let mut seen = vec![];

    while let Some(bytes) = scanner.next_frame(&FrameCodec).unwrap() {
        seen.push(bytes.to_vec());
    }

    let expected: Vec<Vec<u8>> = frames.iter().map(FrameCodec::encode).collect();
    assert_eq!(seen, expected);
}

#[test]
fn empty_source_is_a_clean_end() {
    let mut scanner = FrameScanner::new(Cursor::new(Vec::<u8>::new()), 64, 1024);

    assert!(scanner.next_frame(&FrameCodec).unwrap().is_none());
    // Stays at end of stream.
    assert!(scanner.next_frame(&FrameCodec).unwrap().is_none());
}

#[test]
fn trailing_partial_frame_is_truncation() {
    let frame = Frame::single(MessageId(1), PayloadKind::Message, b"abcdef".to_vec());
    let mut wire = FrameCodec::encode(&frame);
    wire.pop();
    let buffered = wire.len();

    let mut scanner = FrameScanner::new(Cursor::new(wire), 64, 1024);

    match scanner.next_frame(&FrameCodec) {
        Err(ReceiveError::Internal(InternalError::TruncatedFrame { buffered: n })) => {
            assert_eq!(n, buffered)
        }
        other => panic!("expected truncation, got {other:?}"),
    }
}

#[test]
fn buffer_grows_for_frames_larger_than_initial_size() {
    let payload = vec![0xABu8; 2000];
    let frame = Frame::single(MessageId(9), PayloadKind::Message, payload);
    let wire = FrameCodec::encode(&frame);

    let mut scanner = FrameScanner::new(ChunkedReader::new(wire.clone(), 100), 16, 8192);

    let bytes = scanner.next_frame(&FrameCodec).unwrap().unwrap().to_vec();
    assert_eq!(bytes, wire);
    assert!(scanner.buffer().capacity() >= wire.len());
    assert!(scanner.buffer().capacity() <= 8192);
}

#[test]
fn frame_above_the_cap_is_rejected() {
    let frame = Frame::single(MessageId(1), PayloadKind::Message, vec![1u8; 100]);
    let wire = FrameCodec::encode(&frame);

    let mut scanner = FrameScanner::new(Cursor::new(wire), 16, 64);

    match scanner.next_frame(&FrameCodec) {
        Err(ReceiveError::Internal(InternalError::FrameTooLarge { max_frame_size })) => {
            assert_eq!(max_frame_size, 64)
        }
        other => panic!("expected oversize error, got {other:?}"),
    }
}

#[test]
fn malformed_input_poisons_the_scanner() {
    // Unknown kind (0) in an otherwise plausible header.
    let mut wire: Vec<u8> = vec![];
    wire.extend(&0u32.to_le_bytes());
    wire.extend(&1u64.to_le_bytes());
    wire.push(0);
    wire.push(1);

    let mut scanner = FrameScanner::new(Cursor::new(wire), 64, 1024);

    let expected = InternalError::MalformedFrame(FrameParseError::UnknownPayloadKind(0));

    for _ in 0..2 {
        match scanner.next_frame(&FrameCodec) {
            Err(ReceiveError::Internal(err)) => assert_eq!(err, expected),
            other => panic!("expected malformed frame, got {other:?}"),
        }
    }

    assert!(scanner.buffer().is_poisoned());
}

/// Claims success but hands back a remainder longer than its input.
struct OverreachingParser;

static LONG_REMAINDER: [u8; 64] = [0; 64];

impl FrameParser for OverreachingParser {
    fn parse_frame<'a>(&self, _buf: &'a [u8]) -> Result<ParseOutcome<'a>, FrameParseError> {
        Ok(ParseOutcome::Complete {
            frame: Frame::single(MessageId(0), PayloadKind::Message, Vec::<u8>::new()),
            remainder: &LONG_REMAINDER,
        })
    }
}

#[test]
fn remainder_longer_than_input_is_a_bad_parse() {
    let mut scanner = FrameScanner::new(Cursor::new(b"abc".to_vec()), 64, 1024);

    let err = scanner.next_frame(&OverreachingParser).unwrap_err();
    assert_eq!(err.kind(), ReceiveErrorKind::Internal);
    assert!(matches!(
        err,
        ReceiveError::Internal(InternalError::BadParse { remainder: 64, .. })
    ));
}

#[test]
fn read_errors_surface_as_transport_errors() {
    let frame = Frame::new(MessageId(1), PayloadKind::Message, true, true, b"ab".to_vec());
    let mut wire = FrameCodec::encode(&frame);
    wire.truncate(wire.len() - 1);

    let mut scanner = FrameScanner::new(FailingReader::new(wire), 64, 1024);

    let err = scanner.next_frame(&FrameCodec).unwrap_err();
    assert_eq!(err.kind(), ReceiveErrorKind::Transport);
    assert!(matches!(
        err,
        ReceiveError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset
    ));
}

/// Fails its first read with `Interrupted`.
struct InterruptOnce<R> {
    inner: R,
    interrupted: bool,
}

impl<R: Read> Read for InterruptOnce<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.inner.read(buf)
    }
}

#[test]
fn interrupted_reads_are_retried() {
    let frame = Frame::single(MessageId(2), PayloadKind::Close, b"bye".to_vec());
    let wire = FrameCodec::encode(&frame);

    let reader = InterruptOnce {
        inner: Cursor::new(wire.clone()),
        interrupted: false,
    };
    let mut scanner = FrameScanner::new(reader, 64, 1024);

    assert_eq!(scanner.next_frame(&FrameCodec).unwrap(), Some(wire.as_slice()));
}

#[test]
fn several_frames_in_one_read_are_returned_separately() {
    let frames = vec![
        Frame::single(MessageId(1), PayloadKind::Message, b"one".to_vec()),
        Frame::single(MessageId(2), PayloadKind::Message, b"two".to_vec()),
        Frame::single(MessageId(3), PayloadKind::Message, b"three".to_vec()),
    ];
    let wire = encode_all(&frames);

    let mut scanner = FrameScanner::new(Cursor::new(wire), 4096, 4096);

    let mut count = 0;
    while let Some(bytes) = scanner.next_frame(&FrameCodec).unwrap() {
        assert_eq!(bytes, FrameCodec::encode(&frames[count]).as_slice());
        count += 1;
    }
    assert_eq!(count, 3);
}
