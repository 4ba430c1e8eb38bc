//! Movie availability cost comparison.
//!
//! Given a known movie, a region, a budget ceiling and a desired watch
//! count, ranks the surviving options by total cost and explains the
//! winner. Every failure mode is a domain error carrying a message the
//! user can self-correct from.

use serde::Serialize;
use thiserror::Error;

use crate::catalog;
use crate::models::{AvailabilityOption, OptionKind};

/// Closed failure taxonomy; never fatal to the dialogue
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AvailabilityError {
    #[error("I currently don't have data for \"{title}\". Try \"Inception\", \"The Matrix\", \"Interstellar\", or \"Dune\".")]
    NotFound { title: String },

    #[error("I have data for {title}, but not for region \"{country}\". Try \"US\" or \"UK\".")]
    RegionNotSupported { title: String, country: String },

    #[error("I found options for {title} in {country}, but they all exceed your budget of ${budget}. The cheapest is {cheapest:.2}.")]
    BudgetTooLow {
        title: String,
        country: String,
        budget: f64,
        cheapest: f64,
    },
}

impl AvailabilityError {
    /// Stable machine-readable kind for the wire
    pub fn kind(&self) -> &'static str {
        match self {
            AvailabilityError::NotFound { .. } => "not_found",
            AvailabilityError::RegionNotSupported { .. } => "region_not_supported",
            AvailabilityError::BudgetTooLow { .. } => "budget_too_low",
        }
    }
}

/// An option annotated with its total cost for the requested watch count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostedOption {
    #[serde(flatten)]
    pub option: AvailabilityOption,
    pub total_cost: f64,
    /// Advisory note on subscription options when a rental also fits budget
    pub break_even: Option<String>,
}

/// Ranked comparison result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvailabilityReport {
    pub movie: String,
    pub country: String,
    /// Surviving options, cheapest first
    pub options: Vec<CostedOption>,
    pub cheapest: CostedOption,
    /// Absolute savings versus the runner-up, when one exists
    pub savings: Option<String>,
    pub break_even: Option<String>,
    pub recommendation: String,
}

/// Rentals needed per month before a subscription pays for itself
pub fn break_even_count(subscription_price: f64, rent_price: f64) -> u32 {
    (subscription_price / rent_price).ceil() as u32
}

/// Compares the ways to watch a movie within budget.
///
/// Subscription cost is flat per month regardless of watch count; rent and
/// buy multiply the unit cost by `watch_count`.
pub fn compare_availability(
    title: &str,
    country: &str,
    budget: f64,
    watch_count: u32,
) -> Result<AvailabilityReport, AvailabilityError> {
    let movie = catalog::find_movie(title).ok_or_else(|| AvailabilityError::NotFound {
        title: title.to_string(),
    })?;

    let country = country.to_uppercase();
    let region_options =
        movie
            .options_in(&country)
            .ok_or_else(|| AvailabilityError::RegionNotSupported {
                title: movie.title.clone(),
                country: country.clone(),
            })?;

    let valid: Vec<&AvailabilityOption> = region_options
        .iter()
        .filter(|opt| opt.cost <= budget)
        .collect();

    if valid.is_empty() {
        let cheapest = region_options
            .iter()
            .map(|o| o.cost)
            .fold(f64::INFINITY, f64::min);
        return Err(AvailabilityError::BudgetTooLow {
            title: movie.title.clone(),
            country,
            budget,
            cheapest,
        });
    }

    let rent_price = valid
        .iter()
        .find(|o| o.kind == OptionKind::Rent)
        .map(|o| o.cost);

    let mut costed: Vec<CostedOption> = valid
        .iter()
        .map(|opt| {
            let (total_cost, break_even) = match opt.kind {
                OptionKind::Subscription => {
                    let note = rent_price.map(|rent| {
                        format!(
                            "Subscription becomes cheaper if you watch {}+ movies/month",
                            break_even_count(opt.cost, rent)
                        )
                    });
                    (opt.cost, note)
                }
                OptionKind::Rent | OptionKind::Buy => (opt.cost * f64::from(watch_count), None),
            };
            CostedOption {
                option: (*opt).clone(),
                total_cost,
                break_even,
            }
        })
        .collect();

    costed.sort_by(|a, b| {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let cheapest = costed[0].clone();
    let savings = costed.get(1).map(|next| {
        format!(
            "Save ${:.2} vs {} ({})",
            next.total_cost - cheapest.total_cost,
            next.option.platform,
            kind_label(next.option.kind)
        )
    });

    let recommendation = if watch_count == 1 && cheapest.option.kind == OptionKind::Rent {
        format!(
            "Since you're only watching 1 movie, renting on {} is the cheapest option.",
            cheapest.option.platform
        )
    } else if cheapest.option.kind == OptionKind::Subscription {
        format!(
            "With {} movie(s) in mind (or general usage), {} subscription offers the best value.",
            watch_count, cheapest.option.platform
        )
    } else {
        format!(
            "{} ({}) is your most improved option within budget.",
            cheapest.option.platform,
            kind_label(cheapest.option.kind)
        )
    };

    Ok(AvailabilityReport {
        movie: movie.title.clone(),
        country,
        break_even: cheapest.break_even.clone(),
        cheapest,
        savings,
        options: costed,
        recommendation,
    })
}

fn kind_label(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Subscription => "subscription",
        OptionKind::Rent => "rent",
        OptionKind::Buy => "buy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_movie_is_not_found() {
        let err = compare_availability("tenet", "US", 20.0, 1).unwrap_err();
        assert_eq!(err.kind(), "not_found");
        assert!(err.to_string().contains("Inception"));
    }

    #[test]
    fn test_unsupported_region() {
        // Scenario C
        let err = compare_availability("inception", "FR", 20.0, 1).unwrap_err();
        assert_eq!(err.kind(), "region_not_supported");
        assert!(matches!(
            err,
            AvailabilityError::RegionNotSupported { ref country, .. } if country == "FR"
        ));
    }

    #[test]
    fn test_budget_too_low_reports_cheapest_price() {
        let err = compare_availability("inception", "US", 1.0, 1).unwrap_err();
        match err {
            AvailabilityError::BudgetTooLow { cheapest, .. } => assert_eq!(cheapest, 3.99),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cheapest_us_option_for_inception_is_the_rental() {
        // Scenario B
        let report = compare_availability("inception", "US", 5.0, 1).unwrap();
        assert_eq!(report.cheapest.option.platform, "Apple TV");
        assert_eq!(report.cheapest.option.kind, OptionKind::Rent);
        assert_eq!(report.cheapest.total_cost, 3.99);
        assert!(report
            .recommendation
            .starts_with("Since you're only watching 1 movie"));
    }

    #[test]
    fn test_rent_cost_scales_with_watch_count() {
        let report = compare_availability("inception", "US", 20.0, 4).unwrap();
        let rental = report
            .options
            .iter()
            .find(|o| o.option.kind == OptionKind::Rent)
            .unwrap();
        assert_eq!(rental.total_cost, 3.99 * 4.0);
        let subscription = report
            .options
            .iter()
            .find(|o| o.option.kind == OptionKind::Subscription)
            .unwrap();
        // Flat monthly price regardless of watch count
        assert_eq!(subscription.total_cost, subscription.option.cost);
    }

    #[test]
    fn test_break_even_arithmetic() {
        assert_eq!(break_even_count(15.49, 3.99), 4);
        assert_eq!(break_even_count(12.0, 3.0), 4);
        assert_eq!(break_even_count(12.01, 3.0), 5);

        // At the break-even count the subscription path costs no more than
        // renting that many times.
        let count = break_even_count(15.49, 3.99);
        assert!(15.49 <= 3.99 * f64::from(count));
    }

    #[test]
    fn test_subscription_options_carry_break_even_note() {
        let report = compare_availability("inception", "US", 20.0, 1).unwrap();
        let subscription = report
            .options
            .iter()
            .find(|o| o.option.platform == "Netflix")
            .unwrap();
        let note = subscription.break_even.as_deref().unwrap();
        // ceil(15.49 / 3.99) = 4
        assert_eq!(note, "Subscription becomes cheaper if you watch 4+ movies/month");
    }

    #[test]
    fn test_savings_versus_runner_up() {
        let report = compare_availability("the matrix", "US", 20.0, 1).unwrap();
        // Rent 3.99 beats Peacock 5.99
        assert_eq!(report.cheapest.option.platform, "Prime Video");
        assert_eq!(report.savings.as_deref(), Some("Save $2.00 vs Peacock (subscription)"));
    }

    #[test]
    fn test_subscription_recommended_for_repeat_viewing() {
        // Four watches: rentals total 3.99*4 = 15.96, Hulu stays 7.99
        let report = compare_availability("dune", "US", 16.0, 4).unwrap();
        assert_eq!(report.cheapest.option.platform, "Hulu");
        assert_eq!(report.cheapest.option.kind, OptionKind::Subscription);
        assert!(report.recommendation.contains("subscription offers the best value"));
    }
}
