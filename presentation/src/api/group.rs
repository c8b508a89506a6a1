use crate::api::error::{map_json_rejection, ApiError};
use crate::api::identity::AuthenticatedUser;
use crate::application_ports::Locator;
use application_ports::group_channel::{ChangeMembersCommand, CreateGroupCommand};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domain_shared::authentication::UserId;
use domain_shared::chat::{ChannelId, ChannelRecord, MemberIds};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A member list field as sent by the client. Anything that is not an array of
/// strings is kept so that validation can report it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MemberIdsBody {
    List(Vec<UserId>),
    Other(IgnoredAny),
}

fn to_member_ids(body: Option<MemberIdsBody>) -> MemberIds {
    match body {
        Some(MemberIdsBody::List(ids)) => MemberIds::List(ids),
        Some(MemberIdsBody::Other(_)) => MemberIds::Malformed,
        None => MemberIds::Missing,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub member_ids: Option<MemberIdsBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMembersRequest {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub new_members: Option<MemberIdsBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMembersRequest {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub members_to_remove: Option<MemberIdsBody>,
}

#[derive(Debug, Serialize)]
pub struct GroupCreatedResponse {
    pub success: bool,
    pub channel: ChannelRecord,
}

#[derive(Debug, Serialize)]
pub struct MembersChangedResponse {
    pub success: bool,
    pub message: &'static str,
    pub channel: ChannelRecord,
}

#[instrument(level = "debug", skip(service_locator, body))]
pub async fn create_group_handler<L: Locator>(
    State(service_locator): State<L>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupCreatedResponse>), ApiError> {
    let Json(request) = body.map_err(map_json_rejection)?;
    let command = CreateGroupCommand {
        group_name: request.group_name,
        member_ids: to_member_ids(request.member_ids),
    };

    let channel = service_locator
        .get_group_channel_port()
        .create_group(user_id, command)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GroupCreatedResponse {
            success: true,
            channel,
        }),
    ))
}

#[instrument(level = "debug", skip(service_locator, body))]
pub async fn add_members_handler<L: Locator>(
    State(service_locator): State<L>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<AddMembersRequest>, JsonRejection>,
) -> Result<Json<MembersChangedResponse>, ApiError> {
    let Json(request) = body.map_err(map_json_rejection)?;
    let command = ChangeMembersCommand {
        channel_id: request.channel_id.map(ChannelId),
        member_ids: to_member_ids(request.new_members),
    };

    let channel = service_locator
        .get_group_channel_port()
        .add_members(command)
        .await?;

    Ok(Json(MembersChangedResponse {
        success: true,
        message: "Members added",
        channel,
    }))
}

#[instrument(level = "debug", skip(service_locator, body))]
pub async fn remove_members_handler<L: Locator>(
    State(service_locator): State<L>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<RemoveMembersRequest>, JsonRejection>,
) -> Result<Json<MembersChangedResponse>, ApiError> {
    let Json(request) = body.map_err(map_json_rejection)?;
    let command = ChangeMembersCommand {
        channel_id: request.channel_id.map(ChannelId),
        member_ids: to_member_ids(request.members_to_remove),
    };

    let channel = service_locator
        .get_group_channel_port()
        .remove_members(command)
        .await?;

    Ok(Json(MembersChangedResponse {
        success: true,
        message: "Members removed",
        channel,
    }))
}
