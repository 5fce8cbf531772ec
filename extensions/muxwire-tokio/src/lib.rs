mod async_frame_scanner;
mod async_receiver;

pub use async_frame_scanner::AsyncFrameScanner;
pub use async_receiver::AsyncReceiver;
