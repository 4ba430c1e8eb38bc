use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdsPreference;

/// The high-level goal inferred from the user's messages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MovieFinder,
    GeneralComparison,
    Advisor,
}

/// Accumulated dialogue state for one session.
///
/// Every slot is write-once: the first extracted value is kept and later
/// turns cannot overwrite it, so the profile converges monotonically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationContext {
    pub intent: Option<Intent>,
    /// Normalized catalog key (lowercased), e.g. "dune"
    pub movie_title: Option<String>,
    /// 2-letter region code, e.g. "US"
    pub country: Option<String>,
    pub budget: Option<f64>,
    pub people_count: Option<u32>,
    pub kids: Option<bool>,
    pub wants_4k: Option<bool>,
    pub hours_per_week: Option<f64>,
    pub content_prefs: Vec<String>,
    pub current_services: Vec<String>,
    pub ads_preference: Option<AdsPreference>,
}

/// Partial update produced by one extraction pass.
///
/// Only carries slots the extractor actually found in the current turn;
/// merging respects first-write-wins on the receiving context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotUpdates {
    pub intent: Option<Intent>,
    pub movie_title: Option<String>,
    pub country: Option<String>,
    pub budget: Option<f64>,
    pub people_count: Option<u32>,
    pub kids: Option<bool>,
    pub wants_4k: Option<bool>,
}

impl SlotUpdates {
    /// True when no slot was extracted from the turn
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ConversationContext {
    /// Merges extracted slots into a new context, first-write-wins.
    ///
    /// Slots already set on `self` are never replaced.
    pub fn merged(&self, updates: &SlotUpdates) -> Self {
        let mut next = self.clone();
        if next.intent.is_none() {
            next.intent = updates.intent;
        }
        if next.movie_title.is_none() {
            next.movie_title = updates.movie_title.clone();
        }
        if next.country.is_none() {
            next.country = updates.country.clone();
        }
        if next.budget.is_none() {
            next.budget = updates.budget;
        }
        if next.people_count.is_none() {
            next.people_count = updates.people_count;
        }
        if next.kids.is_none() {
            next.kids = updates.kids;
        }
        if next.wants_4k.is_none() {
            next.wants_4k = updates.wants_4k;
        }
        next
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry; append-only, never edited
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Internal trace strings for observability; never parsed back
    #[serde(default)]
    pub thoughts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            thoughts: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>, thoughts: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            thoughts,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_fills_unset_slots() {
        let ctx = ConversationContext::default();
        let updates = SlotUpdates {
            intent: Some(Intent::MovieFinder),
            movie_title: Some("dune".to_string()),
            ..Default::default()
        };
        let next = ctx.merged(&updates);
        assert_eq!(next.intent, Some(Intent::MovieFinder));
        assert_eq!(next.movie_title.as_deref(), Some("dune"));
        assert_eq!(next.budget, None);
    }

    #[test]
    fn test_merge_is_first_write_wins() {
        let ctx = ConversationContext {
            intent: Some(Intent::Advisor),
            budget: Some(15.0),
            wants_4k: Some(false),
            ..Default::default()
        };
        let updates = SlotUpdates {
            intent: Some(Intent::MovieFinder),
            budget: Some(50.0),
            wants_4k: Some(true),
            country: Some("UK".to_string()),
            ..Default::default()
        };
        let next = ctx.merged(&updates);
        assert_eq!(next.intent, Some(Intent::Advisor));
        assert_eq!(next.budget, Some(15.0));
        assert_eq!(next.wants_4k, Some(false));
        // Unset slots still fill
        assert_eq!(next.country.as_deref(), Some("UK"));
    }

    #[test]
    fn test_merge_is_idempotent_once_full() {
        let ctx = ConversationContext {
            intent: Some(Intent::MovieFinder),
            movie_title: Some("inception".to_string()),
            country: Some("US".to_string()),
            budget: Some(10.0),
            people_count: Some(2),
            kids: Some(true),
            wants_4k: Some(true),
            ..Default::default()
        };
        let updates = SlotUpdates {
            intent: Some(Intent::Advisor),
            movie_title: Some("dune".to_string()),
            country: Some("UK".to_string()),
            budget: Some(99.0),
            people_count: Some(9),
            kids: Some(false),
            wants_4k: Some(false),
        };
        assert_eq!(ctx.merged(&updates), ctx);
    }

    #[test]
    fn test_slot_updates_is_empty() {
        assert!(SlotUpdates::default().is_empty());
        let updates = SlotUpdates {
            kids: Some(true),
            ..Default::default()
        };
        assert!(!updates.is_empty());
    }

    #[test]
    fn test_intent_serde_snake_case() {
        let json = serde_json::to_string(&Intent::MovieFinder).unwrap();
        assert_eq!(json, r#""movie_finder""#);
    }
}
