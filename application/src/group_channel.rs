use application_ports::group_channel::{
    ChangeMembersCommand, CoordinationStage, CreateGroupCommand, GroupChannelError,
    GroupChannelPort,
};
use async_trait::async_trait;
use chrono::Utc;
use domain::channel::membership::{
    build_membership_delta, prepare_group_creation, MembershipChange, MembershipDelta,
    ValidationError,
};
use domain::ports::chat::{ChatProviderError, ChatProviderPort};
use domain_shared::authentication::UserId;
use domain_shared::chat::{ChannelId, ChannelRecord};
use std::sync::Arc;
use tracing::field::{display, Empty};
use tracing::{error, info, instrument, warn, Span};

/// Coordinates group channel requests against the chat provider. Every request
/// walks validating, dispatching and confirming in order and keeps no state
/// between requests.
pub struct GroupChannelService {
    chat_provider: Arc<dyn ChatProviderPort + Send + Sync>,
}

impl GroupChannelService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(chat_provider: Arc<dyn ChatProviderPort + Send + Sync>) -> Self {
        Self { chat_provider }
    }

    async fn apply_delta(&self, delta: MembershipDelta) -> Result<ChannelRecord, GroupChannelError> {
        enter_stage(CoordinationStage::Dispatching);
        let dispatched = match delta.change {
            MembershipChange::Add => {
                self.chat_provider
                    .add_members(&delta.channel_id, &delta.members)
                    .await
            }
            MembershipChange::Remove => {
                self.chat_provider
                    .remove_members(&delta.channel_id, &delta.members)
                    .await
            }
        };
        dispatched.map_err(|err| map_provider_err(err, CoordinationStage::Dispatching))?;

        self.confirm(&delta.channel_id).await
    }

    async fn confirm(&self, channel_id: &ChannelId) -> Result<ChannelRecord, GroupChannelError> {
        enter_stage(CoordinationStage::Confirming);
        self.chat_provider
            .watch_channel(channel_id)
            .await
            .map_err(|err| map_provider_err(err, CoordinationStage::Confirming))
    }
}

#[async_trait]
impl GroupChannelPort for GroupChannelService {
    #[instrument(level = "info", skip(self, command), fields(channel_id = Empty, stage = Empty))]
    async fn create_group(
        &self,
        creator: UserId,
        command: CreateGroupCommand,
    ) -> Result<ChannelRecord, GroupChannelError> {
        enter_stage(CoordinationStage::Validating);
        let creation = prepare_group_creation(
            &creator,
            command.group_name.as_deref(),
            &command.member_ids,
            Utc::now(),
        )
        .map_err(map_validation_err)?;
        Span::current().record("channel_id", display(&creation.channel_id));

        enter_stage(CoordinationStage::Dispatching);
        self.chat_provider
            .create_channel(&creation)
            .await
            .map_err(|err| map_provider_err(err, CoordinationStage::Dispatching))?;

        let channel = self.confirm(&creation.channel_id).await?;

        info!(
            creator = %creator,
            member_count = creation.members.len(),
            "Group channel created",
        );

        Ok(channel)
    }

    #[instrument(level = "info", skip(self, command), fields(channel_id = Empty, stage = Empty))]
    async fn add_members(
        &self,
        command: ChangeMembersCommand,
    ) -> Result<ChannelRecord, GroupChannelError> {
        enter_stage(CoordinationStage::Validating);
        let delta = build_membership_delta(
            command.channel_id.as_ref(),
            MembershipChange::Add,
            &command.member_ids,
        )
        .map_err(map_validation_err)?;
        Span::current().record("channel_id", display(&delta.channel_id));
        let added = delta.members.len();

        let channel = self.apply_delta(delta).await?;

        info!(added, "Members added to group channel");

        Ok(channel)
    }

    #[instrument(level = "info", skip(self, command), fields(channel_id = Empty, stage = Empty))]
    async fn remove_members(
        &self,
        command: ChangeMembersCommand,
    ) -> Result<ChannelRecord, GroupChannelError> {
        enter_stage(CoordinationStage::Validating);
        let delta = build_membership_delta(
            command.channel_id.as_ref(),
            MembershipChange::Remove,
            &command.member_ids,
        )
        .map_err(map_validation_err)?;
        Span::current().record("channel_id", display(&delta.channel_id));
        let removed = delta.members.len();

        let channel = self.apply_delta(delta).await?;

        info!(removed, "Members removed from group channel");

        Ok(channel)
    }
}

fn enter_stage(stage: CoordinationStage) {
    Span::current().record("stage", display(stage));
}

#[instrument(level = "trace", skip_all)]
fn map_validation_err(err: ValidationError) -> GroupChannelError {
    warn!(error = %err, "Group channel request rejected");
    GroupChannelError::Validation(err.to_string())
}

#[instrument(level = "trace", skip_all)]
fn map_provider_err(err: ChatProviderError, stage: CoordinationStage) -> GroupChannelError {
    error!(stage = %stage, error = %err, "Chat provider call failed");
    match err {
        ChatProviderError::ChannelNotFound(channel_id) => {
            GroupChannelError::ChannelNotFound { channel_id, stage }
        }
        other => GroupChannelError::Provider {
            stage,
            message: other.to_string(),
        },
    }
}
