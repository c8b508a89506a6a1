use chrono::{DateTime, Utc};
use domain_shared::authentication::UserId;
use domain_shared::chat::ChannelId;
use tracing::instrument;

pub const GROUP_CHANNEL_PREFIX: &str = "group";

/// Derives the identifier of a new group channel as
/// `group-<creator>-<unix millis>`.
///
/// Two requests from the same creator within one millisecond collide.
#[instrument(level = "trace")]
pub fn generate_group_channel_id(creator: &UserId, now: DateTime<Utc>) -> ChannelId {
    ChannelId(format!(
        "{}-{}-{}",
        GROUP_CHANNEL_PREFIX,
        creator.0,
        now.timestamp_millis(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }

    #[test]
    fn formats_creator_and_millis() {
        let id = generate_group_channel_id(&UserId("u1".into()), at(1_700_000_000_123));

        assert_eq!(id, ChannelId("group-u1-1700000000123".into()));
    }

    #[test]
    fn same_inputs_yield_same_id() {
        let creator = UserId("65f1c0ffee".into());

        assert_eq!(
            generate_group_channel_id(&creator, at(42)),
            generate_group_channel_id(&creator, at(42)),
        );
    }

    #[test]
    fn different_creators_or_times_yield_different_ids() {
        let u1 = UserId("u1".into());
        let u2 = UserId("u2".into());

        assert_ne!(
            generate_group_channel_id(&u1, at(42)),
            generate_group_channel_id(&u2, at(42)),
        );
        assert_ne!(
            generate_group_channel_id(&u1, at(42)),
            generate_group_channel_id(&u1, at(43)),
        );
    }
}
