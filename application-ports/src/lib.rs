pub mod group_channel;
pub mod token;
