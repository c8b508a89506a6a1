pub mod channel;
pub mod ports;
