use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A movie with per-region viewing options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Normalized lookup key (lowercased, trimmed), e.g. "the matrix"
    pub key: String,
    /// Display title, e.g. "The Matrix"
    pub title: String,
    pub year: i32,
    /// Options keyed by 2-letter region code
    pub regions: HashMap<String, Vec<AvailabilityOption>>,
}

impl Movie {
    /// Options for a region, if the movie has data there
    pub fn options_in(&self, country: &str) -> Option<&[AvailabilityOption]> {
        self.regions
            .get(&country.to_uppercase())
            .map(Vec::as_slice)
    }
}

/// One way to watch a movie on one platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityOption {
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Subscription,
    Rent,
    Buy,
}
