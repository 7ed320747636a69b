// Read-only views derived from a store's items.

use super::content_item::ContentItem;
use super::moderation_models::ModerationState;
use serde::Serialize;

/// Items waiting on a moderator (flagged and not yet moderated), in store order.
pub fn moderation_queue<'a, T, I>(items: I) -> Vec<T>
where
    T: ContentItem,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| item.moderation_state().is_queued())
        .cloned()
        .collect()
}

/// How many items sit in each moderation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub total: usize,
    pub clean: usize,
    pub flagged: usize,
    pub approved: usize,
}

impl StateCounts {
    pub fn tally<'a, T, I>(items: I) -> Self
    where
        T: ContentItem,
        I: IntoIterator<Item = &'a T>,
    {
        let mut counts = Self::default();
        for item in items {
            counts.total += 1;
            match item.moderation_state() {
                ModerationState::Clean => counts.clean += 1,
                ModerationState::Flagged => counts.flagged += 1,
                ModerationState::Approved => counts.approved += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::Review;

    fn review(user_id: &str, flagged: bool, moderated: bool) -> Review {
        Review {
            product_id: "P1".to_string(),
            user_id: user_id.to_string(),
            rating: 3,
            comment: "ok".to_string(),
            comments: Vec::new(),
            flagged,
            moderated,
        }
    }

    #[test]
    fn test_queue_keeps_only_flagged_unmoderated_in_order() {
        let items = vec![
            review("A", true, false),
            review("B", false, false),
            review("C", true, true),
            review("D", true, false),
        ];

        let queue = moderation_queue(&items);
        let users: Vec<&str> = queue.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(users, vec!["A", "D"]);
    }

    #[test]
    fn test_tally() {
        let items = vec![
            review("A", true, false),
            review("B", false, false),
            review("C", true, true),
            review("D", false, false),
        ];

        let counts = StateCounts::tally(&items);
        assert_eq!(
            counts,
            StateCounts {
                total: 4,
                clean: 2,
                flagged: 1,
                approved: 1,
            }
        );
    }
}
