use crate::channel::channel_id::generate_group_channel_id;
use chrono::{DateTime, Utc};
use domain_shared::authentication::UserId;
use domain_shared::chat::{ChannelId, MemberIds};
use std::collections::HashSet;
use thiserror::Error;
use tracing::instrument;

pub const MIN_GROUP_MEMBERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be an array")]
    NotAnArray { field: &'static str },
    #[error("groupName and at least 2 memberIds (including creator) are required")]
    GroupNameOrMembersMissing,
    #[error("channelId is required")]
    ChannelIdMissing,
    #[error("{field} must contain at least one member id")]
    NoMembers { field: &'static str },
    #[error("{field} must not contain empty member ids")]
    EmptyMemberId { field: &'static str },
}

/// Deduplicated members of a channel, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSet(Vec<UserId>);

impl MembershipSet {
    pub fn members(&self) -> &[UserId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.0.contains(user_id)
    }
}

impl FromIterator<UserId> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        MembershipSet(
            iter.into_iter()
                .filter(|user_id| seen.insert(user_id.clone()))
                .collect(),
        )
    }
}

/// A validated request to create a group channel, ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCreation {
    pub channel_id: ChannelId,
    pub name: String,
    pub members: MembershipSet,
    pub created_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Add,
    Remove,
}

impl MembershipChange {
    /// Name of the request field carrying the ids for this change.
    pub fn field(self) -> &'static str {
        match self {
            MembershipChange::Add => "newMembers",
            MembershipChange::Remove => "membersToRemove",
        }
    }
}

/// Members to add to or remove from an existing channel. Current membership is
/// not consulted; the provider treats repeated adds and removes as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipDelta {
    pub channel_id: ChannelId,
    pub change: MembershipChange,
    pub members: Vec<UserId>,
}

const MEMBER_IDS_FIELD: &str = "memberIds";

#[instrument(level = "trace", skip(requested))]
pub fn build_creation_membership(
    creator: &UserId,
    requested: &MemberIds,
) -> Result<MembershipSet, ValidationError> {
    let requested = require_list(requested, MEMBER_IDS_FIELD)?;

    Ok(requested
        .into_iter()
        .chain(std::iter::once(creator.clone()))
        .collect())
}

/// Checks the group name and member count together, as both are reported with
/// the same error.
#[instrument(level = "trace", skip(group_name, members))]
pub fn validate_group_creation(
    group_name: Option<&str>,
    members: &MembershipSet,
) -> Result<String, ValidationError> {
    match group_name.map(str::trim) {
        Some(name) if !name.is_empty() && members.len() >= MIN_GROUP_MEMBERS => {
            Ok(name.to_string())
        }
        _ => Err(ValidationError::GroupNameOrMembersMissing),
    }
}

#[instrument(level = "trace", skip(group_name, requested))]
pub fn prepare_group_creation(
    creator: &UserId,
    group_name: Option<&str>,
    requested: &MemberIds,
    now: DateTime<Utc>,
) -> Result<GroupCreation, ValidationError> {
    let channel_id = generate_group_channel_id(creator, now);
    let members = build_creation_membership(creator, requested)?;
    let name = validate_group_creation(group_name, &members)?;

    Ok(GroupCreation {
        channel_id,
        name,
        members,
        created_by: creator.clone(),
    })
}

#[instrument(level = "trace", skip(ids))]
pub fn build_membership_delta(
    channel_id: Option<&ChannelId>,
    change: MembershipChange,
    ids: &MemberIds,
) -> Result<MembershipDelta, ValidationError> {
    let channel_id = channel_id
        .filter(|id| !id.0.trim().is_empty())
        .ok_or(ValidationError::ChannelIdMissing)?;
    let members = require_list(ids, change.field())?;

    if members.is_empty() {
        return Err(ValidationError::NoMembers {
            field: change.field(),
        });
    }

    Ok(MembershipDelta {
        channel_id: channel_id.clone(),
        change,
        members,
    })
}

/// Returns the listed ids with surrounding whitespace removed.
fn require_list(ids: &MemberIds, field: &'static str) -> Result<Vec<UserId>, ValidationError> {
    let ids = match ids {
        MemberIds::List(ids) => ids,
        MemberIds::Missing | MemberIds::Malformed => {
            return Err(ValidationError::NotAnArray { field });
        }
    };

    ids.iter()
        .map(|id| match id.0.trim() {
            "" => Err(ValidationError::EmptyMemberId { field }),
            trimmed => Ok(UserId(trimmed.to_string())),
        })
        .collect()
}
