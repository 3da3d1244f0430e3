//! Builds the push messages for each notification kind.

use academichub_common::{PlatformHints, Priority, PushMessage};
use academichub_config::NotifyConfig;
use serde_json::Value;

use crate::conditions::{FriendRequestTarget, LikeTarget, ManualPush};
use crate::events::{CommentCreated, FriendRequestCreated, PostUpdated};

pub const COMMENT_TITLE: &str = "New comment on your post";
pub const LIKE_TITLE: &str = "Someone liked your post";
pub const FRIEND_REQUEST_BODY: &str = "Tap to view the request.";
const ELLIPSIS: char = '…';

/// Cuts `text` to at most `max_chars` Unicode scalar values, appending `…`
/// when anything was cut.
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut snippet = String::with_capacity(cut + ELLIPSIS.len_utf8());
            snippet.push_str(&text[..cut]);
            snippet.push(ELLIPSIS);
            snippet
        }
        None => text.to_string(),
    }
}

/// Whole counts print without a decimal point.
pub fn like_body(like_count: f64) -> String {
    let noun = if like_count > 1.0 { "likes" } else { "like" };
    format!("Your post now has {} {}.", like_count, noun)
}

/// The sender's display name, or `fallback` unless the stored value is a
/// string with visible characters.
pub fn sender_label<'a>(name: Option<&'a Value>, fallback: &'a str) -> &'a str {
    name.and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone)]
pub struct Composer {
    body_max_chars: usize,
    sender_fallback: String,
    hints: PlatformHints,
}

impl Default for Composer {
    fn default() -> Self {
        Self::from_config(&NotifyConfig::default())
    }
}

impl Composer {
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self {
            body_max_chars: config.body_max_chars,
            sender_fallback: config.sender_fallback.clone(),
            hints: PlatformHints {
                sound: Some(config.default_sound.clone()).filter(|s| !s.is_empty()),
                priority: Priority::High,
            },
        }
    }

    fn message(&self, title: impl Into<String>, body: impl Into<String>) -> PushMessage {
        PushMessage::new(title, body).with_hints(self.hints.clone())
    }

    pub fn comment(&self, event: &CommentCreated) -> PushMessage {
        self.message(COMMENT_TITLE, truncate_snippet(&event.text, self.body_max_chars))
            .with_data("topicId", event.topic_id.as_str())
            .with_data("postId", event.post_id.as_str())
            .with_data("type", "comment")
    }

    pub fn like(&self, event: &PostUpdated, target: &LikeTarget) -> PushMessage {
        self.message(LIKE_TITLE, like_body(target.like_count))
            .with_data("topicId", event.topic_id.as_str())
            .with_data("postId", event.post_id.as_str())
            .with_data("type", "like")
    }

    pub fn friend_request(
        &self,
        event: &FriendRequestCreated,
        target: &FriendRequestTarget,
    ) -> PushMessage {
        let sender = sender_label(event.name.as_ref(), &self.sender_fallback);
        self.message(
            format!("{} sent you a friend request", sender),
            FRIEND_REQUEST_BODY,
        )
        .with_data("type", "friend_request")
        .with_data("friendId", target.requester.as_str())
    }

    pub fn manual(&self, push: &ManualPush) -> PushMessage {
        self.message(push.title.as_str(), push.body.as_str())
            .with_data("type", "manual")
            .with_data("targetUserId", push.target_user_id.as_str())
    }
}
