//! Event shapes delivered by the document store, and the request of the
//! callable push endpoint.
//!
//! Every field that may be missing in the incoming JSON becomes an `Option`
//! or a defaulted value here, once. Code past this module works with the
//! typed events only.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Tags of the document events this service subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `topics/{topicId}/posts/{postId}/comments/{commentId}` created
    CommentCreated,
    /// `topics/{topicId}/posts/{postId}` updated
    PostUpdated,
    /// `Users/{toUid}/friendRequests/{requesterUid}` created
    FriendRequestCreated,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::CommentCreated,
        EventKind::PostUpdated,
        EventKind::FriendRequestCreated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CommentCreated => "comment.created",
            EventKind::PostUpdated => "post.updated",
            EventKind::FriendRequestCreated => "friend_request.created",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One document event as posted by the event source.
///
/// Created documents carry `value`; updates carry `before` and `after`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventEnvelope {
    /// Event tag, e.g. `comment.created`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Wildcards of the document path, e.g. `{"topicId": "t1", "postId": "p1"}`
    #[serde(default, deserialize_with = "path_params")]
    pub params: HashMap<String, String>,

    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub value: Option<Value>,

    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub before: Option<Value>,

    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub after: Option<Value>,
}

impl EventEnvelope {
    /// A path parameter, empty when absent.
    pub fn param(&self, name: &str) -> String {
        self.params.get(name).cloned().unwrap_or_default()
    }

    fn non_empty_param(&self, name: &str) -> Option<String> {
        self.params.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

/// `null` for the whole map or for a single entry reads as absent.
/// Non-string scalars keep their JSON text.
fn path_params<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect())
}

fn field<'a>(document: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    document.and_then(|doc| doc.get(name)).filter(|v| !v.is_null())
}

fn string_field(document: Option<&Value>, name: &str) -> Option<String> {
    field(document, name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric counter, 0 when missing or not a number. Fractions are kept.
fn count_field(document: Option<&Value>, name: &str) -> f64 {
    field(document, name).and_then(Value::as_f64).unwrap_or(0.0)
}

/// A new comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCreated {
    pub topic_id: String,
    pub post_id: String,
    pub comment_id: String,
    pub author_id: Option<String>,
    /// Comment text, empty when the document has none
    pub text: String,
}

impl CommentCreated {
    pub fn from_envelope(envelope: &EventEnvelope) -> Self {
        let value = envelope.value.as_ref();
        Self {
            topic_id: envelope.param("topicId"),
            post_id: envelope.param("postId"),
            comment_id: envelope.param("commentId"),
            author_id: string_field(value, "authorId"),
            text: string_field(value, "text").unwrap_or_default(),
        }
    }
}

/// A post document changed; only the like counter and author matter here
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdated {
    pub topic_id: String,
    pub post_id: String,
    pub previous_likes: f64,
    pub current_likes: f64,
    /// Author as of the update
    pub author: Option<String>,
}

impl PostUpdated {
    pub fn from_envelope(envelope: &EventEnvelope) -> Self {
        let before = envelope.before.as_ref();
        let after = envelope.after.as_ref();
        Self {
            topic_id: envelope.param("topicId"),
            post_id: envelope.param("postId"),
            previous_likes: count_field(before, "likeCount"),
            current_likes: count_field(after, "likeCount"),
            author: string_field(after, "author"),
        }
    }
}

/// A friend request document was created under the recipient
#[derive(Debug, Clone, PartialEq)]
pub struct FriendRequestCreated {
    pub to_uid: Option<String>,
    pub requester_uid: Option<String>,
    /// Sender display name exactly as stored, may be any JSON type
    pub name: Option<Value>,
}

impl FriendRequestCreated {
    pub fn from_envelope(envelope: &EventEnvelope) -> Self {
        Self {
            to_uid: envelope.non_empty_param("toUid"),
            requester_uid: envelope.non_empty_param("requesterUid"),
            name: field(envelope.value.as_ref(), "name").cloned(),
        }
    }
}

/// Payload of the callable `sendPushNotification` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ManualPushRequest {
    pub target_user_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> EventEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_event_kind_tags() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
        assert_eq!("post.deleted".parse::<EventKind>(), Err("post.deleted".to_string()));
    }

    #[test]
    fn test_comment_adapter() {
        let event = CommentCreated::from_envelope(&envelope(json!({
            "type": "comment.created",
            "params": { "topicId": "t1", "postId": "p1", "commentId": "c1" },
            "value": { "authorId": "bob", "text": "Nice!" }
        })));

        assert_eq!(event.topic_id, "t1");
        assert_eq!(event.post_id, "p1");
        assert_eq!(event.comment_id, "c1");
        assert_eq!(event.author_id.as_deref(), Some("bob"));
        assert_eq!(event.text, "Nice!");
    }

    #[test]
    fn test_comment_adapter_defaults() {
        let event = CommentCreated::from_envelope(&envelope(json!({
            "type": "comment.created",
            "value": { "text": null }
        })));

        assert_eq!(event.topic_id, "");
        assert_eq!(event.author_id, None);
        assert_eq!(event.text, "");
    }

    #[test]
    fn test_post_adapter_coalesces_counts() {
        let event = PostUpdated::from_envelope(&envelope(json!({
            "type": "post.updated",
            "params": { "topicId": "t1", "postId": "p1" },
            "before": {},
            "after": { "likeCount": 4, "author": "alice" }
        })));

        assert_eq!(event.previous_likes, 0.0);
        assert_eq!(event.current_likes, 4.0);
        assert_eq!(event.author.as_deref(), Some("alice"));

        let event = PostUpdated::from_envelope(&envelope(json!({ "type": "post.updated" })));
        assert_eq!(event.previous_likes, 0.0);
        assert_eq!(event.current_likes, 0.0);
        assert_eq!(event.author, None);
    }

    #[test]
    fn test_post_adapter_keeps_fractional_counts() {
        let event = PostUpdated::from_envelope(&envelope(json!({
            "type": "post.updated",
            "before": { "likeCount": 1 },
            "after": { "likeCount": 1.5 }
        })));

        assert_eq!(event.previous_likes, 1.0);
        assert_eq!(event.current_likes, 1.5);

        let event = PostUpdated::from_envelope(&envelope(json!({
            "type": "post.updated",
            "after": { "likeCount": "7" }
        })));
        assert_eq!(event.current_likes, 0.0);
    }

    #[test]
    fn test_null_params_read_as_absent() {
        let event = envelope(json!({ "type": "post.updated", "params": null }));
        assert!(event.params.is_empty());

        let event = envelope(json!({
            "type": "friend_request.created",
            "params": { "toUid": "alice", "requesterUid": null, "page": 2 }
        }));
        assert_eq!(event.param("toUid"), "alice");
        assert_eq!(event.param("page"), "2");
        assert!(!event.params.contains_key("requesterUid"));
        assert_eq!(FriendRequestCreated::from_envelope(&event).requester_uid, None);
    }

    #[test]
    fn test_friend_request_adapter() {
        let event = FriendRequestCreated::from_envelope(&envelope(json!({
            "type": "friend_request.created",
            "params": { "toUid": "alice", "requesterUid": "" },
            "value": { "name": 42 }
        })));

        assert_eq!(event.to_uid.as_deref(), Some("alice"));
        assert_eq!(event.requester_uid, None);
        assert_eq!(event.name, Some(json!(42)));
    }

    #[test]
    fn test_manual_request_field_names() {
        let request: ManualPushRequest = serde_json::from_value(json!({
            "targetUserId": "alice", "title": "Hi"
        }))
        .unwrap();

        assert_eq!(request.target_user_id.as_deref(), Some("alice"));
        assert_eq!(request.title.as_deref(), Some("Hi"));
        assert_eq!(request.body, None);
    }
}
