//! Dialogue orchestration.
//!
//! One pure function per turn: refresh the context through the extractor,
//! then either ask for the first missing slot of the active intent or hand
//! the completed slot set to a recommendation engine. Every turn emits
//! exactly one assistant utterance and never a user-visible hard error.

use crate::catalog;
use crate::engine::availability::{compare_availability, AvailabilityError};
use crate::engine::extractor::{extract_slots, is_bare_number};
use crate::engine::scoring::score_plans;
use crate::models::{ConversationContext, Intent, OptionKind, RawProfile, ViewerProfile};

/// Exact greeting matches (after punctuation strip) that short-circuit the
/// state machine.
const GREETINGS: &[&str] = &["hi", "hello", "hey", "yo", "greetings"];

/// Words that mark a message as at least on-topic when no intent is known
const TOPIC_KEYWORDS: &[&str] = &[
    "movie", "watch", "stream", "plan", "subscription", "cost", "price", "recommend", "netflix",
    "hbo", "hulu", "disney", "prime", "apple", "peacock", "paramount",
];

/// Result of advancing the dialogue by one user turn
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueTurn {
    pub reply: String,
    /// Internal trace strings, for observability only
    pub thoughts: Vec<String>,
    /// The context after this turn's extraction and flow updates
    pub context: ConversationContext,
}

impl DialogueTurn {
    fn new(reply: impl Into<String>, thoughts: Vec<&str>, context: ConversationContext) -> Self {
        Self {
            reply: reply.into(),
            thoughts: thoughts.into_iter().map(str::to_string).collect(),
            context,
        }
    }
}

/// Advances the dialogue by one turn and returns the assistant utterance
/// together with the updated context.
pub fn advance(text: &str, ctx: &ConversationContext) -> DialogueTurn {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();

    // Greetings bypass the state machine entirely and leave the context
    // untouched.
    if GREETINGS.contains(&strip_punctuation(&lower).as_str()) {
        return DialogueTurn::new("Hey.", vec![], ctx.clone());
    }

    let updates = extract_slots(trimmed, ctx);
    let next = ctx.merged(&updates);

    tracing::debug!(
        intent = ?next.intent,
        movie_title = ?next.movie_title,
        country = ?next.country,
        budget = ?next.budget,
        "Context after extraction"
    );

    let Some(intent) = next.intent else {
        let on_topic = next.movie_title.is_some()
            || next.country.is_some()
            || next.budget.is_some()
            || TOPIC_KEYWORDS.iter().any(|k| lower.contains(k));
        if !on_topic && updates.budget.is_none() {
            return DialogueTurn::new(
                "Tell me a bit more — what movie are you thinking about?",
                vec!["Scope limit"],
                next,
            );
        }
        return DialogueTurn::new("What are you trying to figure out?", vec!["Intent unclear"], next);
    };

    let budget_just_set = updates.budget.is_some();
    match intent {
        Intent::MovieFinder => movie_finder_flow(next, trimmed),
        Intent::GeneralComparison => general_comparison_flow(next),
        Intent::Advisor => advisor_flow(next, &lower, budget_just_set),
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Slot order: title, country, budget; the first missing slot produces a
/// targeted question.
fn movie_finder_flow(mut ctx: ConversationContext, last_input: &str) -> DialogueTurn {
    if ctx.movie_title.is_none() {
        return DialogueTurn::new("What movie would you like to watch?", vec!["Missing: Title"], ctx);
    }
    if ctx.country.is_none() {
        return DialogueTurn::new("Which country are you in?", vec!["Missing: Country"], ctx);
    }
    if ctx.budget.is_none() {
        // The extractor only catches marked amounts and all-digit replies;
        // accept a plain numeric answer to the budget question here.
        match last_input.trim().parse::<f64>() {
            Ok(num) if num > 0.0 && num < 1000.0 => ctx.budget = Some(num),
            _ => {
                return DialogueTurn::new("What's your budget?", vec!["Missing: Budget"], ctx);
            }
        }
    }
    movie_result(ctx)
}

fn movie_result(ctx: ConversationContext) -> DialogueTurn {
    let title = ctx.movie_title.clone().unwrap_or_default();
    let country = ctx.country.clone().unwrap_or_default();
    let budget = ctx.budget.unwrap_or_default();

    match compare_availability(&title, &country, budget, 1) {
        Ok(report) => {
            let best = &report.cheapest;
            let mut msg = format!(
                "Here's the deal for **{}** in the **{}**.\n\n",
                report.movie, report.country
            );
            match best.option.kind {
                OptionKind::Rent => {
                    msg.push_str(&format!(
                        "Renting on **{}** is your best bet at ${:.2}. ",
                        best.option.platform, best.option.cost
                    ));
                    if report.savings.is_some() {
                        msg.push_str("It's cheaper than buying or subscribing right now. ");
                    }
                }
                OptionKind::Subscription => {
                    msg.push_str(&format!(
                        "Using **{}** (${:.2}) makes the most sense if you're planning to watch more than one movie. ",
                        best.option.platform, best.option.cost
                    ));
                }
                OptionKind::Buy => {
                    msg.push_str(&format!(
                        "You can watch it on **{}** for ${:.2}. ",
                        best.option.platform, best.option.cost
                    ));
                }
            }
            if let Some(break_even) = &report.break_even {
                msg.push_str(&format!("\n\nJust so you know, {}.", break_even.to_lowercase()));
            }
            DialogueTurn::new(msg, vec!["Recommendation ready"], ctx)
        }
        Err(err) => {
            let reply = match &err {
                AvailabilityError::NotFound { title } => format!(
                    "I don't have \"{}\" listed yet. I mostly know about Inception, Dune, and The Matrix.",
                    title
                ),
                AvailabilityError::BudgetTooLow {
                    title,
                    country,
                    budget,
                    cheapest,
                } => format!(
                    "You might need a bit more than ${}. The cheapest option for {} in the {} is around ${:.2}.",
                    budget, title, country, cheapest
                ),
                AvailabilityError::RegionNotSupported { country, .. } => {
                    format!("I don't have data for {} yet. Try US or UK.", country)
                }
            };
            let thought = format!("Error: {}", err.kind());
            DialogueTurn {
                reply,
                thoughts: vec![thought],
                context: ctx,
            }
        }
    }
}

fn general_comparison_flow(ctx: ConversationContext) -> DialogueTurn {
    let Some(country) = ctx.country.clone() else {
        return DialogueTurn::new(
            "If you're looking for the cheapest platform with the biggest catalog, Prime Video usually wins on value. Netflix is pricier but has more originals.\n\nWhich country are you in? Prices and libraries change a lot by region.",
            vec![],
            ctx,
        );
    };

    let msg = match country.as_str() {
        "US" => "In the US, **Prime Video** ($14.99/mo) offers the most movies for the price. **Netflix** Standard is $15.49 but has better exclusives. **Disney+** ($13.99) is great for franchises.".to_string(),
        "UK" => "In the UK, **Prime Video** (£8.99/mo) is a strong value. **Netflix** starts around £10.99. **Disney+** is £7.99.".to_string(),
        other => format!(
            "In {}, prices vary, but **Prime Video** is generally the volume leader, while **Netflix** leads in originals.",
            other
        ),
    };
    DialogueTurn::new(msg, vec![], ctx)
}

/// Slot order: budget, people count, quality signal; then score the catalog
/// with defaults for anything still optional.
fn advisor_flow(mut ctx: ConversationContext, lower: &str, budget_just_set: bool) -> DialogueTurn {
    if ctx.budget.is_none() {
        match lower.trim().parse::<f64>() {
            Ok(num) if num > 0.0 => ctx.budget = Some(num),
            _ => {
                return DialogueTurn::new("What's your monthly budget?", vec!["Missing: Budget"], ctx);
            }
        }
    }

    if ctx.people_count.is_none() {
        // A bare number answers whichever numeric question is pending; if
        // this turn's number already filled the budget slot it cannot also
        // count the household.
        if lower.contains("just me") {
            ctx.people_count = Some(1);
        } else if !budget_just_set && is_bare_number(lower) {
            if let Ok(num) = lower.trim().parse::<u32>() {
                if num > 0 {
                    ctx.people_count = Some(num);
                }
            }
        }
        if ctx.people_count.is_none() {
            return DialogueTurn::new("How many people?", vec!["Missing: People"], ctx);
        }
    }

    // An explicit earlier answer counts, as does hd/4k in the current turn.
    let quality_known = ctx.wants_4k.is_some() || lower.contains("hd") || lower.contains("4k");
    if !quality_known {
        return DialogueTurn::new("Do you need 4K?", vec!["Missing: Quality"], ctx);
    }

    let profile = ViewerProfile::normalize(&RawProfile {
        budget_max: ctx.budget,
        people_count: ctx.people_count.map(i64::from),
        kids: ctx.kids,
        wants_4k: ctx.wants_4k,
        hours_per_week: ctx.hours_per_week,
        content_prefs: Some(ctx.content_prefs.clone()),
        current_services: Some(ctx.current_services.clone()),
        ads_preference: ctx.ads_preference,
    });
    let advice = score_plans(&profile, &catalog::PLANS);

    match &advice.best {
        Some(best) => {
            let budget = ctx.budget.unwrap_or_default();
            DialogueTurn::new(
                format!(
                    "You should go with **{} {}**. It fits your ${} budget.",
                    best.service, best.label, budget
                ),
                vec!["Plan generated"],
                ctx,
            )
        }
        None => DialogueTurn::new(advice.summary, vec!["Error: no_suitable_plan"], ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(text: &str, ctx: &ConversationContext) -> DialogueTurn {
        advance(text, ctx)
    }

    #[test]
    fn test_greeting_short_circuit_keeps_context_empty() {
        // Scenario D
        let ctx = ConversationContext::default();
        let result = turn("hi", &ctx);
        assert_eq!(result.reply, "Hey.");
        assert_eq!(result.context.intent, None);
        assert_eq!(result.context, ctx);
    }

    #[test]
    fn test_greeting_with_punctuation() {
        let result = turn("Hello!!", &ConversationContext::default());
        assert_eq!(result.reply, "Hey.");
    }

    #[test]
    fn test_unrelated_message_gets_scope_redirect() {
        let result = turn("tell me about the weather", &ConversationContext::default());
        assert_eq!(result.reply, "Tell me a bit more — what movie are you thinking about?");
        assert_eq!(result.thoughts, vec!["Scope limit".to_string()]);
    }

    #[test]
    fn test_on_topic_but_unclear_gets_clarifying_question() {
        let result = turn("netflix netflix netflix", &ConversationContext::default());
        assert_eq!(result.reply, "What are you trying to figure out?");
        assert_eq!(result.thoughts, vec!["Intent unclear".to_string()]);
    }

    #[test]
    fn test_movie_finder_slot_order() {
        // Scenario E, step by step
        let ctx = ConversationContext::default();

        let first = turn("I want to watch Dune", &ctx);
        assert_eq!(first.context.intent, Some(Intent::MovieFinder));
        assert_eq!(first.context.movie_title.as_deref(), Some("dune"));
        assert_eq!(first.reply, "Which country are you in?");

        let second = turn("US", &first.context);
        assert_eq!(second.context.country.as_deref(), Some("US"));
        assert_eq!(second.reply, "What's your budget?");

        let third = turn("15", &second.context);
        assert_eq!(third.context.budget, Some(15.0));
        assert_eq!(third.thoughts, vec!["Recommendation ready".to_string()]);
        // Within $15 the Apple TV rental at 5.99 beats the Hulu subscription
        assert!(third.reply.contains("Renting on **Apple TV**"));
    }

    #[test]
    fn test_movie_finder_asks_for_title_when_only_intent_known() {
        let result = turn("I want to watch a movie", &ConversationContext::default());
        assert_eq!(result.context.intent, Some(Intent::MovieFinder));
        assert_eq!(result.reply, "What movie would you like to watch?");
        assert_eq!(result.thoughts, vec!["Missing: Title".to_string()]);
    }

    #[test]
    fn test_movie_finder_reports_region_error_as_friendly_reply() {
        let ctx = ConversationContext {
            intent: Some(Intent::MovieFinder),
            movie_title: Some("inception".to_string()),
            country: Some("DE".to_string()),
            budget: Some(20.0),
            ..Default::default()
        };
        let result = turn("anything", &ctx);
        assert_eq!(result.reply, "I don't have data for DE yet. Try US or UK.");
        assert_eq!(result.thoughts, vec!["Error: region_not_supported".to_string()]);
    }

    #[test]
    fn test_movie_finder_budget_too_low_mentions_cheapest() {
        let ctx = ConversationContext {
            intent: Some(Intent::MovieFinder),
            movie_title: Some("inception".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        };
        let result = turn("2", &ctx);
        assert!(result.reply.contains("around $3.99"));
        assert_eq!(result.thoughts, vec!["Error: budget_too_low".to_string()]);
    }

    #[test]
    fn test_general_comparison_asks_for_region_first() {
        let ctx = ConversationContext::default();
        let first = turn("which streaming service is best?", &ctx);
        assert_eq!(first.context.intent, Some(Intent::GeneralComparison));
        assert!(first.reply.contains("Which country are you in?"));

        let second = turn("UK", &first.context);
        assert!(second.reply.contains("In the UK"));
    }

    #[test]
    fn test_general_comparison_templated_for_other_regions() {
        let ctx = ConversationContext {
            intent: Some(Intent::GeneralComparison),
            country: Some("CA".to_string()),
            ..Default::default()
        };
        let result = turn("ok", &ctx);
        assert!(result.reply.starts_with("In CA, prices vary"));
    }

    #[test]
    fn test_advisor_slot_filling_to_recommendation() {
        let ctx = ConversationContext::default();

        let first = turn("help me pick a subscription plan", &ctx);
        assert_eq!(first.context.intent, Some(Intent::Advisor));
        assert_eq!(first.reply, "What's your monthly budget?");

        // Bare number answers the pending budget question via the extractor
        let second = turn("15", &first.context);
        assert_eq!(second.context.budget, Some(15.0));
        assert_eq!(second.reply, "How many people?");

        let third = turn("just me", &second.context);
        assert_eq!(third.context.people_count, Some(1));
        assert_eq!(third.reply, "Do you need 4K?");

        let fourth = turn("hd is fine", &third.context);
        assert_eq!(fourth.context.wants_4k, Some(false));
        assert_eq!(fourth.thoughts, vec!["Plan generated".to_string()]);
        assert!(fourth.reply.starts_with("You should go with"));
    }

    #[test]
    fn test_advisor_accepts_household_size_number() {
        let ctx = ConversationContext {
            intent: Some(Intent::Advisor),
            budget: Some(25.0),
            ..Default::default()
        };
        let result = turn("4", &ctx);
        assert_eq!(result.context.people_count, Some(4));
        assert_eq!(result.reply, "Do you need 4K?");
    }

    #[test]
    fn test_intent_is_sticky_across_turns() {
        let ctx = ConversationContext {
            intent: Some(Intent::Advisor),
            ..Default::default()
        };
        // A turn full of movie-finder cues cannot change the intent
        let result = turn("I want to watch Inception", &ctx);
        assert_eq!(result.context.intent, Some(Intent::Advisor));
    }

    #[test]
    fn test_slot_monotonicity_over_many_turns() {
        let mut ctx = ConversationContext::default();
        let turns = [
            "I want to watch Dune",
            "actually The Matrix",
            "UK",
            "no wait, US",
            "10",
            "make it $99",
        ];
        let mut snapshots: Vec<ConversationContext> = Vec::new();
        for text in turns {
            ctx = turn(text, &ctx).context;
            snapshots.push(ctx.clone());
        }
        // Once set, every slot keeps its first value
        assert_eq!(ctx.movie_title.as_deref(), Some("dune"));
        assert_eq!(ctx.country.as_deref(), Some("UK"));
        assert_eq!(ctx.budget, Some(10.0));
        for window in snapshots.windows(2) {
            if window[0].movie_title.is_some() {
                assert_eq!(window[0].movie_title, window[1].movie_title);
            }
            if window[0].country.is_some() {
                assert_eq!(window[0].country, window[1].country);
            }
        }
    }
}
