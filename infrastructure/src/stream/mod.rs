mod channel_record;
pub mod jwt;
pub mod token;

use crate::stream::channel_record::{stream_to_domain_channel_record, QueryChannelResponse};
use crate::stream::jwt::encode_hs256;
use async_trait::async_trait;
use domain::channel::membership::GroupCreation;
use domain::ports::chat::{ChannelId, ChannelRecord, ChatProviderError, ChatProviderPort};
use domain_shared::authentication::UserId;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{instrument, warn};

pub const DEFAULT_STREAM_BASE_URL: &str = "https://chat.stream-io-api.com";

/// Stream reports a missing resource with this error code.
const STREAM_DOES_NOT_EXIST_CODE: u32 = 16;

#[derive(Clone)]
pub struct StreamChatAdapterConfig {
    pub base_url: Url,
    pub api_key: String,
    pub api_secret: String,
    pub channel_type: String,
}

pub struct StreamChatAdapter {
    config: StreamChatAdapterConfig,
    http_client: HttpClient,
}

#[derive(Serialize)]
struct QueryChannelRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<ChannelData<'a>>,
    state: bool,
}

#[derive(Serialize)]
struct ChannelData<'a> {
    name: &'a str,
    members: &'a [UserId],
    created_by_id: &'a UserId,
}

#[derive(Serialize, Default)]
struct UpdateMembersRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    add_members: Option<&'a [UserId]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remove_members: Option<&'a [UserId]>,
}

#[derive(Deserialize, Debug)]
struct StreamErrorResponse {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: Option<String>,
}

impl StreamChatAdapter {
    #[instrument(level = "trace", skip_all)]
    pub fn new(config: StreamChatAdapterConfig) -> Self {
        Self {
            config,
            http_client: HttpClient::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn channel_url(
        &self,
        channel_id: &ChannelId,
        action: Option<&str>,
    ) -> Result<Url, ChatProviderError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                warn!(base_url = %self.config.base_url, "Stream base URL cannot carry a path");
                ChatProviderError::Unavailable("Stream base URL is invalid".to_string())
            })?
            .pop_if_empty()
            .extend(["channels", self.config.channel_type.as_str(), channel_id.0.as_str()])
            .extend(action);
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key);
        Ok(url)
    }

    #[instrument(level = "trace", skip(self))]
    fn server_token(&self) -> Result<String, ChatProviderError> {
        encode_hs256(&json!({ "server": true }), &self.config.api_secret).map_err(|err| {
            warn!(error = %err, "Failed to sign Stream server token");
            ChatProviderError::Unavailable(format!("cannot authenticate to Stream: {}", err))
        })
    }

    #[instrument(level = "debug", skip(self, body))]
    async fn post<B, R>(
        &self,
        channel_id: &ChannelId,
        url: Url,
        body: &B,
    ) -> Result<R, ChatProviderError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(url)
            .header("authorization", self.server_token()?)
            .header("stream-auth-type", "jwt")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = ?err, "Stream request failed");
                ChatProviderError::Unavailable(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = response.json::<StreamErrorResponse>().await.ok();
            return Err(map_stream_err(channel_id, status, error));
        }

        response.json::<R>().await.map_err(|err| {
            warn!(error = ?err, "Failed to parse Stream response");
            ChatProviderError::Unavailable(err.to_string())
        })
    }
}

#[async_trait]
impl ChatProviderPort for StreamChatAdapter {
    #[instrument(level = "debug", err, skip(self, creation), fields(channel_id = %creation.channel_id))]
    async fn create_channel(&self, creation: &GroupCreation) -> Result<(), ChatProviderError> {
        let url = self.channel_url(&creation.channel_id, Some("query"))?;
        let request = QueryChannelRequest {
            data: Some(ChannelData {
                name: &creation.name,
                members: creation.members.members(),
                created_by_id: &creation.created_by,
            }),
            state: false,
        };

        self.post::<_, IgnoredAny>(&creation.channel_id, url, &request)
            .await?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn watch_channel(
        &self,
        channel_id: &ChannelId,
    ) -> Result<ChannelRecord, ChatProviderError> {
        let url = self.channel_url(channel_id, Some("query"))?;
        let request = QueryChannelRequest {
            data: None,
            state: true,
        };

        let response: QueryChannelResponse = self.post(channel_id, url, &request).await?;

        Ok(stream_to_domain_channel_record(response))
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn add_members(
        &self,
        channel_id: &ChannelId,
        members: &[UserId],
    ) -> Result<(), ChatProviderError> {
        let url = self.channel_url(channel_id, None)?;
        let request = UpdateMembersRequest {
            add_members: Some(members),
            ..Default::default()
        };

        self.post::<_, IgnoredAny>(channel_id, url, &request).await?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn remove_members(
        &self,
        channel_id: &ChannelId,
        members: &[UserId],
    ) -> Result<(), ChatProviderError> {
        let url = self.channel_url(channel_id, None)?;
        let request = UpdateMembersRequest {
            remove_members: Some(members),
            ..Default::default()
        };

        self.post::<_, IgnoredAny>(channel_id, url, &request).await?;

        Ok(())
    }
}

#[instrument(level = "trace", skip_all)]
fn map_stream_err(
    channel_id: &ChannelId,
    status: StatusCode,
    error: Option<StreamErrorResponse>,
) -> ChatProviderError {
    let code = error.as_ref().and_then(|error| error.code);
    if status == StatusCode::NOT_FOUND || code == Some(STREAM_DOES_NOT_EXIST_CODE) {
        warn!(channel_id = %channel_id, "Stream channel does not exist");
        return ChatProviderError::ChannelNotFound(channel_id.clone());
    }

    let message = error
        .and_then(|error| error.message)
        .unwrap_or_else(|| status.to_string());
    warn!(status = status.as_u16(), message = %message, "Stream rejected the request");
    ChatProviderError::Rejected(format!("{} ({})", message, status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::channel::membership::prepare_group_creation;
    use domain_shared::chat::MemberIds;
    use httpmock::prelude::*;

    fn adapter(server: &MockServer) -> StreamChatAdapter {
        StreamChatAdapter::new(StreamChatAdapterConfig {
            base_url: Url::parse(&server.base_url()).unwrap(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            channel_type: "messaging".to_string(),
        })
    }

    fn user(id: &str) -> UserId {
        UserId(id.to_string())
    }

    fn channel_state(members: &[&str]) -> serde_json::Value {
        json!({
            "channel": {
                "id": "group-u1-1",
                "type": "messaging",
                "cid": "messaging:group-u1-1",
                "name": "Team",
                "created_by": { "id": "u1", "role": "user" },
                "member_count": members.len(),
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:05:00Z",
                "frozen": false
            },
            "members": members
                .iter()
                .map(|id| json!({ "user_id": id, "user": { "id": id } }))
                .collect::<Vec<_>>(),
            "messages": [],
            "duration": "1.23ms"
        })
    }

    #[tokio::test]
    async fn create_channel_sends_name_members_and_creator() {
        let server = MockServer::start_async().await;
        let creation = prepare_group_creation(
            &user("u1"),
            Some("Team"),
            &MemberIds::List(vec![user("u2"), user("u2")]),
            chrono::Utc::now(),
        )
        .unwrap();
        let path = format!("/channels/messaging/{}/query", creation.channel_id);
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(path)
                    .query_param("api_key", "key")
                    .header("stream-auth-type", "jwt")
                    .header_exists("authorization")
                    .json_body(json!({
                        "data": {
                            "name": "Team",
                            "members": ["u2", "u1"],
                            "created_by_id": "u1"
                        },
                        "state": false
                    }));
                then.status(201).json_body(channel_state(&["u2", "u1"]));
            })
            .await;

        adapter(&server).create_channel(&creation).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn watch_channel_maps_provider_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/channels/messaging/group-u1-1/query")
                    .json_body(json!({ "state": true }));
                then.status(200).json_body(channel_state(&["u1", "u2"]));
            })
            .await;

        let record = adapter(&server)
            .watch_channel(&ChannelId("group-u1-1".to_string()))
            .await
            .unwrap();

        assert_eq!(record.id, ChannelId("group-u1-1".to_string()));
        assert_eq!(record.cid, "messaging:group-u1-1");
        assert_eq!(record.name.as_deref(), Some("Team"));
        assert_eq!(record.created_by_id, Some(user("u1")));
        assert_eq!(record.members, vec![user("u1"), user("u2")]);
        assert_eq!(record.member_count, 2);
        assert!(record.created_at.is_some());
    }

    #[tokio::test]
    async fn add_and_remove_members_update_the_channel() {
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/channels/messaging/group-u1-1")
                    .json_body(json!({ "add_members": ["u3"] }));
                then.status(201).json_body(channel_state(&["u1", "u2", "u3"]));
            })
            .await;
        let remove = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/channels/messaging/group-u1-1")
                    .json_body(json!({ "remove_members": ["u2"] }));
                then.status(201).json_body(channel_state(&["u1", "u3"]));
            })
            .await;
        let adapter = adapter(&server);
        let channel_id = ChannelId("group-u1-1".to_string());

        adapter
            .add_members(&channel_id, &[user("u3")])
            .await
            .unwrap();
        adapter
            .remove_members(&channel_id, &[user("u2")])
            .await
            .unwrap();

        add.assert_async().await;
        remove.assert_async().await;
    }

    #[tokio::test]
    async fn missing_channel_is_reported_as_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/channels/messaging/group-u1-404");
                then.status(404).json_body(json!({
                    "code": 16,
                    "message": "UpdateChannel failed with error: \"Can't find channel with id messaging:group-u1-404\"",
                    "StatusCode": 404
                }));
            })
            .await;

        let err = adapter(&server)
            .add_members(&ChannelId("group-u1-404".to_string()), &[user("u2")])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ChatProviderError::ChannelNotFound(ChannelId("group-u1-404".to_string()))
        );
    }

    #[tokio::test]
    async fn rejected_request_keeps_provider_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/channels/messaging/group-u1-1");
                then.status(400).json_body(json!({
                    "code": 4,
                    "message": "UpdateChannel failed with error: \"user u9 does not exist\"",
                    "StatusCode": 400
                }));
            })
            .await;

        let err = adapter(&server)
            .add_members(&ChannelId("group-u1-1".to_string()), &[user("u9")])
            .await
            .unwrap_err();

        match err {
            ChatProviderError::Rejected(message) => {
                assert!(message.contains("user u9 does not exist"));
                assert!(message.contains("400"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
