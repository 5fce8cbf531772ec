mod frame_codec;
mod frame_error;
mod frame_parser;
mod frame_struct;
mod message_id;
mod payload_kind;

pub use frame_codec::FrameCodec;
pub use frame_error::FrameParseError;
pub use frame_parser::{FrameParser, ParseOutcome};
pub use frame_struct::Frame;
pub use message_id::MessageId;
pub use payload_kind::PayloadKind;
