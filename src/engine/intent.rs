//! Keyword intent classifier.
//!
//! Pure rule evaluation in fixed priority order; the first matching rule
//! wins. Once a session's intent is set the orchestrator stops consulting
//! the classifier, so intent is sticky for the rest of the dialogue.

use crate::catalog;
use crate::models::{ConversationContext, Intent};

const COMPARISON_CUES: &[&str] = &["which", "best", "cheap", "worth"];
const PLATFORM_CUES: &[&str] = &["platform", "service", "streaming", "netflix", "hbo", "prime"];
const SUBSCRIPTION_CUES: &[&str] = &["plan", "subscription", "bundle"];
const VIEWING_CUES: &[&str] = &["watch", "find", "movie", "stream"];

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Classifies the user's turn, or returns None when no rule matches
pub fn classify_intent(text: &str, _ctx: &ConversationContext) -> Option<Intent> {
    let lower = text.to_lowercase();

    // 1. A known movie title is the strongest signal
    if catalog::known_title_patterns().any(|(key, title)| lower.contains(key) || lower.contains(&title)) {
        return Some(Intent::MovieFinder);
    }

    // 2. Comparison wording about platforms in general
    if contains_any(&lower, COMPARISON_CUES) && contains_any(&lower, PLATFORM_CUES) {
        return Some(Intent::GeneralComparison);
    }

    // 3. Subscription planning
    if contains_any(&lower, SUBSCRIPTION_CUES) {
        return Some(Intent::Advisor);
    }

    // 4. General desire to watch something
    if contains_any(&lower, VIEWING_CUES) {
        return Some(Intent::MovieFinder);
    }

    None
}
