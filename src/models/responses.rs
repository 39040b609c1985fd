use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::requests::MatchingCriteria;

/// One scored candidate, with the per-factor breakdown kept for explainability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMatch {
    pub id: String,
    pub from_newsletter_id: String,
    pub to_newsletter_id: String,
    pub match_score: f64,
    pub category_alignment: f64,
    pub audience_compatibility: f64,
    pub performance_history: f64,
    pub geographic_alignment: f64,
    pub seasonal_relevance: f64,
    pub competition_level: f64,
    pub is_auto_generated: bool,
    pub last_calculated: DateTime<Utc>,
    pub metadata: MatchMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub algorithm_version: String,
    pub criteria: MatchingCriteria,
    pub generated_at: DateTime<Utc>,
}

/// Output of a single-source matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    /// Sorted by `match_score` descending, at most `max_suggestions` long
    pub matches: Vec<RecommendationMatch>,
    /// Candidates that survived filtering, before the score threshold
    pub total_candidates: usize,
    pub processing_time_ms: f64,
    pub algorithm_version: String,
}
