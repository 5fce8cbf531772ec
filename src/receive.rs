mod frame_scan_buffer;
mod frame_scanner;
mod message;
mod reassembler;
mod receive_error;
mod receiver;
mod receiver_config;

pub use frame_scan_buffer::{FrameScanBuffer, ScanStatus};
pub use frame_scanner::FrameScanner;
pub use message::Message;
pub use reassembler::Reassembler;
pub use receive_error::{InternalError, ProtocolError, ReceiveError, ReceiveErrorKind};
pub use receiver::Receiver;
pub use receiver_config::ReceiverConfig;
