use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::models::domain::Newsletter;

/// Factor weights and result limits for one matching run
///
/// Weights are normalized by their sum when the composite is built, so the
/// defaults summing to 1.0 is a convention rather than a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingCriteria {
    pub category_weight: f64,
    pub audience_compatibility_weight: f64,
    pub performance_history_weight: f64,
    pub geographic_weight: f64,
    pub seasonal_weight: f64,
    pub competition_weight: f64,
    /// Matches strictly below this composite are dropped
    pub min_match_score: f64,
    /// Zero or negative returns no matches
    pub max_suggestions: i32,
}

impl MatchingCriteria {
    pub fn weight_sum(&self) -> f64 {
        self.category_weight
            + self.audience_compatibility_weight
            + self.performance_history_weight
            + self.geographic_weight
            + self.seasonal_weight
            + self.competition_weight
    }

    /// `max_suggestions` as a truncation length
    pub fn suggestion_limit(&self) -> usize {
        usize::try_from(self.max_suggestions).unwrap_or(0)
    }
}

impl Default for MatchingCriteria {
    fn default() -> Self {
        Self {
            category_weight: 0.25,
            audience_compatibility_weight: 0.20,
            performance_history_weight: 0.20,
            geographic_weight: 0.15,
            seasonal_weight: 0.10,
            competition_weight: 0.10,
            min_match_score: 50.0,
            max_suggestions: 10,
        }
    }
}

/// Per-field overrides layered on top of a base [`MatchingCriteria`]
///
/// Snake-case aliases let the same struct deserialize from environment
/// variables, which arrive lowercased with underscores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaOverrides {
    #[serde(default, alias = "category_weight")]
    pub category_weight: Option<f64>,
    #[serde(default, alias = "audience_compatibility_weight")]
    pub audience_compatibility_weight: Option<f64>,
    #[serde(default, alias = "performance_history_weight")]
    pub performance_history_weight: Option<f64>,
    #[serde(default, alias = "geographic_weight")]
    pub geographic_weight: Option<f64>,
    #[serde(default, alias = "seasonal_weight")]
    pub seasonal_weight: Option<f64>,
    #[serde(default, alias = "competition_weight")]
    pub competition_weight: Option<f64>,
    #[serde(default, alias = "min_match_score")]
    pub min_match_score: Option<f64>,
    #[serde(default, alias = "max_suggestions")]
    pub max_suggestions: Option<i32>,
}

impl CriteriaOverrides {
    pub fn apply(&self, base: MatchingCriteria) -> MatchingCriteria {
        MatchingCriteria {
            category_weight: self.category_weight.unwrap_or(base.category_weight),
            audience_compatibility_weight: self
                .audience_compatibility_weight
                .unwrap_or(base.audience_compatibility_weight),
            performance_history_weight: self
                .performance_history_weight
                .unwrap_or(base.performance_history_weight),
            geographic_weight: self.geographic_weight.unwrap_or(base.geographic_weight),
            seasonal_weight: self.seasonal_weight.unwrap_or(base.seasonal_weight),
            competition_weight: self.competition_weight.unwrap_or(base.competition_weight),
            min_match_score: self.min_match_score.unwrap_or(base.min_match_score),
            max_suggestions: self.max_suggestions.unwrap_or(base.max_suggestions),
        }
    }
}

/// Everything a single-source matching run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingAlgorithmInput {
    pub source_newsletter: Newsletter,
    pub candidate_newsletters: Vec<Newsletter>,
    pub criteria: MatchingCriteria,
    #[serde(default)]
    pub exclude_organizations: HashSet<String>,
    /// OR-matched; empty means no category restriction
    #[serde(default)]
    pub include_categories: HashSet<String>,
    /// Pins the month used for seasonal relevance; the clock is read when absent
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}

impl MatchingAlgorithmInput {
    pub fn new(
        source_newsletter: Newsletter,
        candidate_newsletters: Vec<Newsletter>,
        criteria: MatchingCriteria,
    ) -> Self {
        Self {
            source_newsletter,
            candidate_newsletters,
            criteria,
            exclude_organizations: HashSet::new(),
            include_categories: HashSet::new(),
            reference_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let criteria = MatchingCriteria::default();
        assert!((criteria.weight_sum() - 1.0).abs() < 1e-9);
        assert_eq!(criteria.min_match_score, 50.0);
        assert_eq!(criteria.max_suggestions, 10);
    }

    #[test]
    fn test_negative_limit_is_zero() {
        let criteria = MatchingCriteria {
            max_suggestions: -3,
            ..MatchingCriteria::default()
        };
        assert_eq!(criteria.suggestion_limit(), 0);
    }

    #[test]
    fn test_overrides_only_touch_set_fields() {
        let overrides = CriteriaOverrides {
            min_match_score: Some(0.0),
            ..CriteriaOverrides::default()
        };

        let criteria = overrides.apply(MatchingCriteria::default());

        assert_eq!(criteria.min_match_score, 0.0);
        assert_eq!(criteria.category_weight, 0.25);
        assert_eq!(criteria.max_suggestions, 10);
    }

    #[test]
    fn test_overrides_accept_both_spellings() {
        let camel: CriteriaOverrides = serde_json::from_str(r#"{"minMatchScore": 30}"#).unwrap();
        let snake: CriteriaOverrides = serde_json::from_str(r#"{"min_match_score": 30}"#).unwrap();
        assert_eq!(camel, snake);
    }
}
