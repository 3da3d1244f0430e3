#[cfg(test)]
mod tests {
    use crate::composer::{like_body, truncate_snippet};
    use crate::conditions::{friend_request_condition, like_condition, SkipReason, Verdict};
    use crate::events::{FriendRequestCreated, PostUpdated};
    use proptest::prelude::*;

    fn post(previous_likes: f64, current_likes: f64) -> PostUpdated {
        PostUpdated {
            topic_id: "t1".to_string(),
            post_id: "p1".to_string(),
            previous_likes,
            current_likes,
            author: Some("alice".to_string()),
        }
    }

    proptest! {
        // A like notification fires exactly when the counter goes up
        #[test]
        fn test_like_fires_only_on_increase(
            prev in -5i64..10_000,
            new in -5i64..10_000,
            half in any::<bool>(),
        ) {
            let prev = prev as f64;
            let new = if half { new as f64 + 0.5 } else { new as f64 };
            match like_condition(&post(prev, new)) {
                Verdict::Notify(target) => {
                    prop_assert!(new > prev);
                    prop_assert_eq!(target.like_count, new);
                    prop_assert_eq!(target.recipient, "alice");
                }
                Verdict::Skip(reason) => {
                    prop_assert!(new <= prev);
                    prop_assert_eq!(reason, SkipReason::NoLikeIncrease);
                }
            }
        }

        #[test]
        fn test_like_body_mentions_count(n in 1i64..1_000_000) {
            let body = like_body(n as f64);
            prop_assert!(body.contains(&n.to_string()));
            if n == 1 {
                prop_assert!(body.ends_with(" like."));
            } else {
                prop_assert!(body.ends_with(" likes."));
            }
        }

        // Texts up to the limit pass through; longer ones keep the first 100 characters
        #[test]
        fn test_truncation(text in "\\PC{0,250}") {
            let snippet = truncate_snippet(&text, 100);
            let length = text.chars().count();
            if length <= 100 {
                prop_assert_eq!(snippet, text);
            } else {
                let head: String = text.chars().take(100).collect();
                prop_assert_eq!(snippet.chars().count(), 101);
                prop_assert!(snippet.ends_with('…'));
                prop_assert!(snippet.starts_with(&head));
            }
        }

        #[test]
        fn test_friend_request_identity(to in "[a-z]{1,8}", from in "[a-z]{1,8}") {
            let event = FriendRequestCreated {
                to_uid: Some(to.clone()),
                requester_uid: Some(from.clone()),
                name: None,
            };
            match friend_request_condition(&event) {
                Verdict::Notify(target) => {
                    prop_assert_ne!(&to, &from);
                    prop_assert_eq!(target.requester, from);
                    prop_assert_eq!(target.recipient, to);
                }
                Verdict::Skip(reason) => {
                    prop_assert_eq!(&to, &from);
                    prop_assert_eq!(reason, SkipReason::SelfRequest);
                }
            }
        }
    }
}
