use serde::{Deserialize, Serialize};

/// A subscription tier offered by a streaming service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Stable identifier (e.g., "netflix-standard")
    pub id: String,
    /// Service the plan belongs to (e.g., "Netflix")
    pub service: String,
    /// Tier label (e.g., "Standard with Ads")
    pub label: String,
    /// Monthly price
    pub price: f64,
    pub currency: String,
    /// Video quality tier (e.g., "1080p", "4K HDR")
    pub quality: String,
    /// Simultaneous screens included
    pub screens: u32,
    /// Whether the tier is ad-supported
    pub ads: bool,
}

/// Ads tolerance for plan scoring
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AdsPreference {
    NoAds,
    AdsOk,
    #[default]
    Flexible,
}

/// Raw scoring input as supplied by the caller; fields may be missing or junk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub budget_max: Option<f64>,
    pub people_count: Option<i64>,
    pub kids: Option<bool>,
    pub wants_4k: Option<bool>,
    pub hours_per_week: Option<f64>,
    pub content_prefs: Option<Vec<String>>,
    pub current_services: Option<Vec<String>>,
    pub ads_preference: Option<AdsPreference>,
}

/// Normalized profile the scoring engine works with
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerProfile {
    pub budget_max: Option<f64>,
    pub people_count: u32,
    pub kids: bool,
    pub wants_4k: bool,
    pub hours_per_week: f64,
    pub content_prefs: Vec<String>,
    pub current_services: Vec<String>,
    pub ads_preference: AdsPreference,
}

impl ViewerProfile {
    /// Clamps invalid or absent fields to safe defaults
    pub fn normalize(raw: &RawProfile) -> Self {
        let budget_max = raw.budget_max.filter(|b| *b > 0.0);
        let people_count = match raw.people_count {
            Some(n) if n > 0 => n as u32,
            _ => 1,
        };
        let hours_per_week = match raw.hours_per_week {
            Some(h) if h > 0.0 => h,
            _ => 5.0,
        };
        Self {
            budget_max,
            people_count,
            kids: raw.kids.unwrap_or(false),
            wants_4k: raw.wants_4k.unwrap_or(false),
            hours_per_week,
            content_prefs: raw.content_prefs.clone().unwrap_or_default(),
            current_services: raw.current_services.clone().unwrap_or_default(),
            ads_preference: raw.ads_preference.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        let profile = ViewerProfile::normalize(&RawProfile::default());
        assert_eq!(profile.budget_max, None);
        assert_eq!(profile.people_count, 1);
        assert_eq!(profile.hours_per_week, 5.0);
        assert!(!profile.wants_4k);
        assert_eq!(profile.ads_preference, AdsPreference::Flexible);
        assert!(profile.content_prefs.is_empty());
    }

    #[test]
    fn test_normalize_clamps_non_positive_numbers() {
        let raw = RawProfile {
            budget_max: Some(-3.0),
            people_count: Some(0),
            hours_per_week: Some(-1.0),
            ..Default::default()
        };
        let profile = ViewerProfile::normalize(&raw);
        assert_eq!(profile.budget_max, None);
        assert_eq!(profile.people_count, 1);
        assert_eq!(profile.hours_per_week, 5.0);
    }

    #[test]
    fn test_ads_preference_serde_kebab_case() {
        let json = serde_json::to_string(&AdsPreference::NoAds).unwrap();
        assert_eq!(json, r#""no-ads""#);
        let parsed: AdsPreference = serde_json::from_str(r#""ads-ok""#).unwrap();
        assert_eq!(parsed, AdsPreference::AdsOk);
    }
}
