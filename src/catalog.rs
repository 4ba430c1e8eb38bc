//! Static reference data: known subscription plans and movie availability.
//!
//! Read-only to the engine. A real deployment would source this from a
//! provider feed; the engine only ever sees the typed catalog.

use once_cell::sync::Lazy;

use crate::models::{AvailabilityOption, Movie, OptionKind, Plan};

fn plan(
    id: &str,
    service: &str,
    label: &str,
    price: f64,
    quality: &str,
    screens: u32,
    ads: bool,
) -> Plan {
    Plan {
        id: id.to_string(),
        service: service.to_string(),
        label: label.to_string(),
        price,
        currency: "USD".to_string(),
        quality: quality.to_string(),
        screens,
        ads,
    }
}

/// Known subscription plans across the major services
pub static PLANS: Lazy<Vec<Plan>> = Lazy::new(|| {
    vec![
        plan("netflix-basic-ads", "Netflix", "Basic with Ads", 6.99, "1080p", 2, true),
        plan("netflix-standard", "Netflix", "Standard", 15.49, "1080p", 2, false),
        plan("netflix-premium", "Netflix", "Premium", 22.99, "4K HDR", 4, false),
        plan("disney-standard-ads", "Disney+", "Standard with Ads", 7.99, "1080p", 2, true),
        plan("disney-premium", "Disney+", "Premium", 13.99, "4K HDR", 4, false),
        plan("prime-standard", "Prime Video", "Prime Video", 14.99, "4K HDR", 3, false),
        plan("hbo-standard", "Max", "Standard with Ads", 9.99, "1080p", 2, true),
        plan("hbo-ultimate", "Max", "Ultimate Ad-Free", 19.99, "4K HDR", 4, false),
        plan("apple-standard", "Apple TV+", "Standard", 9.99, "4K HDR", 6, false),
    ]
});

fn option(platform: &str, kind: OptionKind, cost: f64) -> AvailabilityOption {
    AvailabilityOption {
        platform: platform.to_string(),
        kind,
        cost,
    }
}

fn movie(key: &str, title: &str, year: i32, regions: Vec<(&str, Vec<AvailabilityOption>)>) -> Movie {
    Movie {
        key: key.to_string(),
        title: title.to_string(),
        year,
        regions: regions
            .into_iter()
            .map(|(code, opts)| (code.to_string(), opts))
            .collect(),
    }
}

/// Known movies with per-region viewing options
pub static MOVIES: Lazy<Vec<Movie>> = Lazy::new(|| {
    use OptionKind::{Buy, Rent, Subscription};
    vec![
        movie(
            "inception",
            "Inception",
            2010,
            vec![
                (
                    "US",
                    vec![
                        option("Netflix", Subscription, 15.49),
                        option("HBO Max", Subscription, 15.99),
                        option("Apple TV", Rent, 3.99),
                        option("Prime Video", Buy, 14.99),
                    ],
                ),
                (
                    "UK",
                    vec![
                        option("Sky Go", Subscription, 25.00),
                        option("Apple TV", Rent, 3.49),
                    ],
                ),
            ],
        ),
        movie(
            "the matrix",
            "The Matrix",
            1999,
            vec![
                (
                    "US",
                    vec![
                        option("HBO Max", Subscription, 15.99),
                        option("Peacock", Subscription, 5.99),
                        option("Prime Video", Rent, 3.99),
                    ],
                ),
                (
                    "UK",
                    vec![
                        option("Netflix", Subscription, 10.99),
                        option("Prime Video", Rent, 3.49),
                    ],
                ),
            ],
        ),
        movie(
            "interstellar",
            "Interstellar",
            2014,
            vec![
                (
                    "US",
                    vec![
                        option("Paramount+", Subscription, 5.99),
                        option("Prime Video", Subscription, 14.99),
                        option("Apple TV", Rent, 3.99),
                    ],
                ),
                (
                    "UK",
                    vec![
                        option("Sky Go", Subscription, 25.00),
                        option("Apple TV", Rent, 3.49),
                    ],
                ),
            ],
        ),
        movie(
            "dune",
            "Dune: Part One",
            2021,
            vec![
                (
                    "US",
                    vec![
                        option("HBO Max", Subscription, 15.99),
                        option("Hulu", Subscription, 7.99),
                        option("Apple TV", Rent, 5.99),
                    ],
                ),
                ("UK", vec![option("Netflix", Subscription, 10.99)]),
            ],
        ),
    ]
});

/// Looks a movie up by its normalized key (lowercased, trimmed title)
pub fn find_movie(title: &str) -> Option<&'static Movie> {
    let key = title.trim().to_lowercase();
    MOVIES.iter().find(|m| m.key == key)
}

/// (key, lowercased display title) pairs the extractor matches against
pub fn known_title_patterns() -> impl Iterator<Item = (&'static str, String)> {
    MOVIES.iter().map(|m| (m.key.as_str(), m.title.to_lowercase()))
}

/// Display titles of every known movie
pub fn known_titles() -> Vec<&'static str> {
    MOVIES.iter().map(|m| m.title.as_str()).collect()
}
