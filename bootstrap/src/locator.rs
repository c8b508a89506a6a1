use application::group_channel::GroupChannelService;
use application::token::TokenService;
use application_ports::group_channel::GroupChannelPort;
use application_ports::token::TokenPort;
use infrastructure::stream::token::StreamTokenSigner;
use infrastructure::stream::StreamChatAdapter;
use presentation::application_ports::Locator;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    pub(crate) token_adapter: Arc<TokenService>,
    pub(crate) group_channel_adapter: Arc<GroupChannelService>,
}

impl ApplicationPortLocator {
    pub fn new(
        token_signer: Arc<StreamTokenSigner>,
        stream_adapter: Arc<StreamChatAdapter>,
    ) -> Self {
        Self {
            token_adapter: Arc::new(TokenService::new(token_signer)),
            group_channel_adapter: Arc::new(GroupChannelService::new(stream_adapter)),
        }
    }
}

impl Locator for ApplicationPortLocator {
    #[instrument(level = "trace", skip(self))]
    fn get_token_port(&self) -> Arc<dyn TokenPort + Send + Sync> {
        self.token_adapter.clone()
    }

    #[instrument(level = "trace", skip(self))]
    fn get_group_channel_port(&self) -> Arc<dyn GroupChannelPort + Send + Sync> {
        self.group_channel_adapter.clone()
    }
}
