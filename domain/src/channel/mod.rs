pub mod channel_id;
pub mod membership;
