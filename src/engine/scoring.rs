//! Subscription plan scoring.
//!
//! Each plan is scored independently by folding a list of additive rules
//! over it; there is no cross-plan normalization. The magnitudes and the
//! discard threshold are heuristic tuning constants pinned by tests, not
//! algorithmic truths.

use serde::Serialize;

use crate::models::{AdsPreference, Plan, ViewerProfile};

/// Plans scoring at or below this are discarded entirely
pub const DISCARD_THRESHOLD: i32 = -5;

/// Hours per week at which the heavy-usage bonus applies
const HEAVY_USAGE_HOURS: f64 = 15.0;

/// Ranked recommendation with its reasoning
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanAdvice {
    /// The winning plan, or None when nothing survives the score filter
    pub best: Option<Plan>,
    /// Up to two runner-ups
    pub alternatives: Vec<Plan>,
    /// One short line per criterion that was evaluated
    pub rationale: Vec<String>,
    pub summary: String,
}

type Rule = fn(&Plan, &ViewerProfile) -> i32;

/// Independent scoring rules; adding a criterion means adding a function
/// here without touching the others.
const RULES: &[Rule] = &[
    budget_rule,
    quality_rule,
    screens_rule,
    ads_rule,
    content_rule,
    heavy_usage_rule,
    loyalty_rule,
];

fn budget_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    match profile.budget_max {
        Some(max) if plan.price <= max => 3,
        Some(max) if plan.price <= max + 5.0 => 1,
        Some(_) => -5,
        None => 0,
    }
}

fn quality_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    if profile.wants_4k {
        if plan.quality.contains("4K") {
            3
        } else {
            -2
        }
    } else if plan.quality == "1080p" {
        1
    } else {
        0
    }
}

fn screens_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    let people = profile.people_count;
    if plan.screens >= people {
        3
    } else if plan.screens >= people.div_ceil(2) {
        1
    } else {
        -1
    }
}

fn ads_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    match profile.ads_preference {
        AdsPreference::NoAds => {
            if plan.ads {
                -3
            } else {
                2
            }
        }
        AdsPreference::AdsOk => {
            if plan.ads {
                1
            } else {
                0
            }
        }
        AdsPreference::Flexible => {
            if plan.ads {
                0
            } else {
                1
            }
        }
    }
}

fn content_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    let prefs = &profile.content_prefs;
    if prefs.is_empty() {
        return 0;
    }
    let has = |p: &str| prefs.iter().any(|pref| pref == p);
    let mut bonus = 0;
    if has("kids") && plan.service == "Disney+" {
        bonus += 4;
    }
    if has("sports") && plan.service == "Prime Video" {
        bonus += 2;
    }
    if has("anime") && plan.service == "Netflix" {
        bonus += 2;
    }
    if has("movies") && matches!(plan.service.as_str(), "Netflix" | "Prime Video" | "Max") {
        bonus += 2;
    }
    if has("series") && matches!(plan.service.as_str(), "Netflix" | "Disney+" | "Max") {
        bonus += 2;
    }
    if has("reality") && plan.service == "Netflix" {
        bonus += 1;
    }
    bonus
}

fn heavy_usage_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    if profile.hours_per_week >= HEAVY_USAGE_HOURS && !plan.ads {
        2
    } else {
        0
    }
}

fn loyalty_rule(plan: &Plan, profile: &ViewerProfile) -> i32 {
    let service = plan.service.to_lowercase();
    if profile
        .current_services
        .iter()
        .any(|s| s.to_lowercase() == service)
    {
        1
    } else {
        0
    }
}

/// Total score for one plan against one profile
pub fn score_plan(plan: &Plan, profile: &ViewerProfile) -> i32 {
    RULES.iter().map(|rule| rule(plan, profile)).sum()
}

/// Scores the catalog and picks the best plan with up to two alternatives.
///
/// The sort is stable, so ties keep the original catalog order, and the
/// whole computation is deterministic for a given (profile, catalog) pair.
pub fn score_plans(profile: &ViewerProfile, catalog: &[Plan]) -> PlanAdvice {
    let mut scored: Vec<(i32, &Plan)> = catalog
        .iter()
        .map(|plan| (score_plan(plan, profile), plan))
        .filter(|(score, _)| *score > DISCARD_THRESHOLD)
        .collect();
    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

    let Some((_, best)) = scored.first() else {
        return PlanAdvice {
            best: None,
            alternatives: Vec::new(),
            rationale: vec![
                "No suitable plans were found within the provided constraints. Consider increasing budget or relaxing requirements.".to_string(),
            ],
            summary: "No clear recommendation can be made with the current inputs.".to_string(),
        };
    };
    let best = (*best).clone();
    let alternatives: Vec<Plan> = scored
        .iter()
        .skip(1)
        .take(2)
        .map(|(_, plan)| (*plan).clone())
        .collect();

    let rationale = build_rationale(&best, &alternatives, profile);
    let summary = format!(
        "Overall, the best fit for you is {} {} at ${:.2} per month, because it balances your budget, desired quality, number of screens, and viewing preferences better than the alternatives.",
        best.service, best.label, best.price
    );

    PlanAdvice {
        best: Some(best),
        alternatives,
        rationale,
        summary,
    }
}

/// One line per evaluated criterion, in a fixed order
fn build_rationale(best: &Plan, alternatives: &[Plan], profile: &ViewerProfile) -> Vec<String> {
    let mut lines = Vec::new();
    match profile.budget_max {
        Some(max) => lines.push(format!(
            "Budget: your limit is about ${:.0} per month, and this plan costs ${:.2} {}.",
            max, best.price, best.currency
        )),
        None => lines.push(
            "Budget: you did not set a strict limit, so recommendations prioritize overall value instead of the absolute lowest price.".to_string(),
        ),
    }
    if profile.wants_4k {
        lines.push(format!(
            "Quality: you prefer 4K/HDR, and this plan delivers {}, which fits big-screen viewing best.",
            best.quality
        ));
    } else {
        lines.push(format!(
            "Quality: HD is enough for you, and this plan offers {}, which balances quality and cost.",
            best.quality
        ));
    }
    lines.push(format!(
        "Screens: you mentioned about {} people; this plan includes {} simultaneous screens so multiple people can watch without conflicts.",
        profile.people_count, best.screens
    ));
    match profile.ads_preference {
        AdsPreference::NoAds if best.ads => lines.push(
            "Ads: your strong preference is to avoid ads, so ad-free alternatives were prioritized even if slightly more expensive.".to_string(),
        ),
        AdsPreference::NoAds => lines.push(
            "Ads: you prefer ad-free viewing, and this plan is ad-free, matching that preference.".to_string(),
        ),
        AdsPreference::AdsOk => lines.push(
            "Ads: you are open to ads to save money, so ad-supported plans with strong value are considered.".to_string(),
        ),
        AdsPreference::Flexible => lines.push(
            "Ads: you are flexible about ads, so both ad-free and ad-supported options are compared on value.".to_string(),
        ),
    }
    if !profile.content_prefs.is_empty() {
        lines.push(format!(
            "Content: your main interests are {}, so platforms strong in those areas were weighted higher.",
            profile.content_prefs.join(", ")
        ));
    }
    if !alternatives.is_empty() {
        let alt_labels: Vec<String> = alternatives
            .iter()
            .map(|p| format!("{} {}", p.service, p.label))
            .collect();
        lines.push(format!(
            "Alternatives: you could also consider {} if you decide to adjust budget or prioritize different content.",
            alt_labels.join("; ")
        ));
    }
    lines
}
