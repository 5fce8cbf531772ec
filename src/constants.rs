// Frame header layout used by `FrameCodec`
pub const FRAME_LENGTH_FIELD_SIZE: usize = 4;
pub const FRAME_MESSAGE_ID_OFFSET: usize = 4;
pub const FRAME_KIND_OFFSET: usize = 12;
pub const FRAME_FLAGS_OFFSET: usize = 13;
pub const FRAME_HEADER_SIZE: usize = 14;

/// Flag bit set on the first frame of a logical message.
pub const FRAME_FLAG_STARTING: u8 = 0b0000_0001;

/// Flag bit set on every frame of a logical message except the last one.
pub const FRAME_FLAG_CONTINUATION: u8 = 0b0000_0010;

/// All flag bits not listed here are reserved and must be zero on the wire.
pub const FRAME_FLAGS_KNOWN: u8 = FRAME_FLAG_STARTING | FRAME_FLAG_CONTINUATION;

/// Capacity the frame scanner allocates up front.
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 32 * 1024;

/// Hard upper bound on the size of a single encoded frame, header included.
///
/// The scanner never grows its buffer past this value; a frame that would
/// need more room is treated as corrupt.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 4 << 20;

/// Smallest step the scanner grows by when its buffer starts out empty.
pub const MIN_BUFFER_GROWTH: usize = 512;
