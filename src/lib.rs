pub mod build_info;
pub mod constants;
pub mod frame;
pub mod receive;
