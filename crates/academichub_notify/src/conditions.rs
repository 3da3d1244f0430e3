// --- File: crates/academichub_notify/src/conditions.rs ---
//! Per-event decisions on whether a notification fires.
//!
//! The evaluators are pure: they look only at the event (and, for comments,
//! the post author already fetched by the caller) and return either the
//! identifiers the rest of the pipeline needs or the reason for skipping.

use serde::Serialize;
use std::fmt;

use crate::events::{CommentCreated, FriendRequestCreated, ManualPushRequest, PostUpdated};

/// Why an event did not produce a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The parent post or its author could not be found
    MissingPost,
    /// The commenter wrote on their own post
    OwnComment,
    /// The like counter did not go up
    NoLikeIncrease,
    /// The event names nobody to notify
    MissingRecipient,
    /// Sender and recipient are the same user
    SelfRequest,
    /// The recipient has no device token
    NoToken,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingPost => "post or post author not found",
            SkipReason::OwnComment => "comment author is the post author",
            SkipReason::NoLikeIncrease => "like count did not increase",
            SkipReason::MissingRecipient => "no recipient on the event",
            SkipReason::SelfRequest => "friend request sent to self",
            SkipReason::NoToken => "recipient has no delivery token",
        };
        f.write_str(text)
    }
}

/// Outcome of a condition evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    Notify(T),
    Skip(SkipReason),
}

/// Go-value for a comment notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    pub recipient: String,
}

/// Go-value for a like notification
#[derive(Debug, Clone, PartialEq)]
pub struct LikeTarget {
    pub recipient: String,
    pub like_count: f64,
}

/// Go-value for a friend request notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequestTarget {
    pub recipient: String,
    pub requester: String,
}

/// A manual push with every field present and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualPush {
    pub target_user_id: String,
    pub title: String,
    pub body: String,
}

/// The only failure a manual push request can have before any lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFields;

/// Notifies the post author about a comment written by someone else.
///
/// A comment without an author id still notifies; only an identical author skips.
pub fn comment_condition(
    event: &CommentCreated,
    post_author: Option<&str>,
) -> Verdict<CommentTarget> {
    let Some(post_author) = post_author.filter(|a| !a.is_empty()) else {
        return Verdict::Skip(SkipReason::MissingPost);
    };

    if event.author_id.as_deref() == Some(post_author) {
        return Verdict::Skip(SkipReason::OwnComment);
    }

    Verdict::Notify(CommentTarget {
        recipient: post_author.to_string(),
    })
}

pub fn like_condition(event: &PostUpdated) -> Verdict<LikeTarget> {
    if event.current_likes <= event.previous_likes {
        return Verdict::Skip(SkipReason::NoLikeIncrease);
    }

    match event.author.as_deref() {
        Some(author) => Verdict::Notify(LikeTarget {
            recipient: author.to_string(),
            like_count: event.current_likes,
        }),
        None => Verdict::Skip(SkipReason::MissingRecipient),
    }
}

pub fn friend_request_condition(event: &FriendRequestCreated) -> Verdict<FriendRequestTarget> {
    let (Some(recipient), Some(requester)) = (event.to_uid.as_deref(), event.requester_uid.as_deref())
    else {
        return Verdict::Skip(SkipReason::MissingRecipient);
    };

    if recipient == requester {
        return Verdict::Skip(SkipReason::SelfRequest);
    }

    Verdict::Notify(FriendRequestTarget {
        recipient: recipient.to_string(),
        requester: requester.to_string(),
    })
}

pub fn manual_push_condition(request: &ManualPushRequest) -> Result<ManualPush, MissingFields> {
    fn required(field: &Option<String>) -> Result<String, MissingFields> {
        field
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(MissingFields)
    }

    Ok(ManualPush {
        target_user_id: required(&request.target_user_id)?,
        title: required(&request.title)?,
        body: required(&request.body)?,
    })
}
