use application_ports::group_channel::GroupChannelPort;
use application_ports::token::TokenPort;
use std::sync::Arc;

pub trait Locator {
    fn get_token_port(&self) -> Arc<dyn TokenPort + Send + Sync>;
    fn get_group_channel_port(&self) -> Arc<dyn GroupChannelPort + Send + Sync>;
}
