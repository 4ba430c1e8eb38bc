//! Heuristic slot extraction.
//!
//! Maps a raw user turn plus the live context to a partial slot update.
//! Extraction is context-sensitive: a bare number is read as the answer to
//! the pending budget question, so the extractor must see the context and
//! not just the text. The update only ever carries slots the context does
//! not already hold.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog;
use crate::engine::intent::classify_intent;
use crate::models::{ConversationContext, SlotUpdates};

/// Optional currency symbol, a number, optional currency word.
static BUDGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$|£|€)?\s?(\d+)(\s?(dollars|pounds|bucks))?").expect("valid regex"));

/// Country aliases checked in order; UK first so "united kingdom" is not
/// shadowed by the "united states" scan.
const UK_ALIASES: &[&str] = &["uk", "united kingdom", "britain"];
const US_ALIASES: &[&str] = &["us", "usa", "united states", "america"];

/// Extracts slot updates from one user turn
pub fn extract_slots(text: &str, ctx: &ConversationContext) -> SlotUpdates {
    let lower = text.to_lowercase();
    let mut updates = SlotUpdates::default();

    if ctx.intent.is_none() {
        updates.intent = classify_intent(text, ctx);
    }

    if ctx.movie_title.is_none() {
        for (key, display) in catalog::known_title_patterns() {
            if lower.contains(key) || lower.contains(&display) {
                updates.movie_title = Some(key.to_string());
                break;
            }
        }
    }

    if ctx.country.is_none() {
        if UK_ALIASES.iter().any(|alias| lower.contains(alias)) {
            updates.country = Some("UK".to_string());
        } else if US_ALIASES.iter().any(|alias| lower.contains(alias)) {
            updates.country = Some("US".to_string());
        }
    }

    if ctx.budget.is_none() {
        if let Some(caps) = BUDGET_RE.captures(text) {
            let has_symbol = caps.get(1).is_some();
            let has_word = caps.get(3).map(|m| !m.as_str().is_empty()).unwrap_or(false);
            if has_symbol || has_word {
                updates.budget = caps[2].parse::<f64>().ok();
            } else if is_bare_number(text) {
                // Known limitation: a message that is only digits is read as
                // the answer to the most recent numeric question, which the
                // flows treat as budget first.
                updates.budget = text.trim().parse::<f64>().ok();
            }
        }
    }

    if ctx.kids.is_none() && (lower.contains("kid") || lower.contains("family")) {
        updates.kids = Some(true);
    }
    if ctx.wants_4k.is_none() {
        if lower.contains("4k") || lower.contains("uhd") {
            updates.wants_4k = Some(true);
        } else if lower.contains("hd") {
            updates.wants_4k = Some(false);
        }
    }

    updates
}

/// True when the trimmed message consists only of digits
pub fn is_bare_number(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
