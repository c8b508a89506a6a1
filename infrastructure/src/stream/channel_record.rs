use chrono::{DateTime, Utc};
use domain_shared::authentication::UserId;
use domain_shared::chat::{ChannelId, ChannelRecord};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(crate) struct QueryChannelResponse {
    pub channel: StreamChannel,
    #[serde(default)]
    pub members: Vec<StreamMember>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct StreamChannel {
    pub id: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub cid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_by: Option<StreamUser>,
    #[serde(default)]
    pub member_count: Option<usize>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct StreamMember {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Option<StreamUser>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct StreamUser {
    pub id: String,
}

pub(crate) fn stream_to_domain_channel_record(response: QueryChannelResponse) -> ChannelRecord {
    let QueryChannelResponse { channel, members } = response;

    let members: Vec<UserId> = members
        .into_iter()
        .filter_map(|member| member.user_id.or(member.user.map(|user| user.id)))
        .map(UserId)
        .collect();

    ChannelRecord {
        id: ChannelId(channel.id),
        channel_type: channel.channel_type,
        cid: channel.cid,
        name: channel.name,
        created_by_id: channel.created_by.map(|user| UserId(user.id)),
        member_count: channel.member_count.unwrap_or(members.len()),
        members,
        created_at: channel.created_at,
        updated_at: channel.updated_at,
    }
}
