use async_trait::async_trait;
use domain_shared::authentication::UserId;
use domain_shared::chat::{ChannelId, ChannelRecord, MemberIds};
use std::fmt;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait GroupChannelPort {
    async fn create_group(
        &self,
        creator: UserId,
        command: CreateGroupCommand,
    ) -> Result<ChannelRecord, GroupChannelError>;
    async fn add_members(
        &self,
        command: ChangeMembersCommand,
    ) -> Result<ChannelRecord, GroupChannelError>;
    async fn remove_members(
        &self,
        command: ChangeMembersCommand,
    ) -> Result<ChannelRecord, GroupChannelError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupCommand {
    pub group_name: Option<String>,
    pub member_ids: MemberIds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeMembersCommand {
    pub channel_id: Option<ChannelId>,
    pub member_ids: MemberIds,
}

/// Stage of a channel-mutating request at which it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinationStage {
    Validating,
    Dispatching,
    Confirming,
}

impl fmt::Display for CoordinationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoordinationStage::Validating => "validating",
            CoordinationStage::Dispatching => "dispatching",
            CoordinationStage::Confirming => "confirming",
        })
    }
}

#[derive(Debug, Error)]
pub enum GroupChannelError {
    #[error("{0}")]
    Validation(String),
    #[error("Channel {channel_id} not found while {stage}")]
    ChannelNotFound {
        channel_id: ChannelId,
        stage: CoordinationStage,
    },
    #[error("Chat provider failed while {stage}: {message}")]
    Provider {
        stage: CoordinationStage,
        message: String,
    },
}
