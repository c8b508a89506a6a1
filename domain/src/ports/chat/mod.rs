use crate::channel::membership::GroupCreation;
use async_trait::async_trait;
use domain_shared::authentication::UserId;
pub use domain_shared::chat::{ChannelId, ChannelRecord};
use thiserror::Error;

/// Channel operations of the external chat provider. The provider owns all
/// channel state; nothing here is cached locally.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ChatProviderPort {
    async fn create_channel(&self, creation: &GroupCreation) -> Result<(), ChatProviderError>;

    /// Fetches the current state of the channel from the provider.
    async fn watch_channel(&self, channel_id: &ChannelId)
        -> Result<ChannelRecord, ChatProviderError>;

    /// Adding a user who is already a member is not an error.
    async fn add_members(
        &self,
        channel_id: &ChannelId,
        members: &[UserId],
    ) -> Result<(), ChatProviderError>;

    /// Removing a user who is not a member is not an error.
    async fn remove_members(
        &self,
        channel_id: &ChannelId,
        members: &[UserId],
    ) -> Result<(), ChatProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatProviderError {
    #[error("Channel {0} does not exist")]
    ChannelNotFound(ChannelId),
    #[error("Chat provider rejected the request: {0}")]
    Rejected(String),
    #[error("Chat provider is unavailable: {0}")]
    Unavailable(String),
}
