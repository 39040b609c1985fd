use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Newsletter as supplied by the data layer
///
/// The engine only reads these; ownership and persistence live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Newsletter {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "clientId", default)]
    pub client_id: String,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(rename = "targetAudience", default)]
    pub target_audience: Option<TargetAudience>,
    #[serde(rename = "subscriberCount", default)]
    pub subscriber_count: u64,
    #[serde(rename = "averageOpenRate", default)]
    pub average_open_rate: Option<f64>,
    #[serde(rename = "isActiveForRecommendations", default)]
    pub is_active_for_recommendations: bool,
    /// Tier multiplier. Carried through, not part of the composite score.
    #[serde(rename = "recommendationWeight", default = "default_recommendation_weight")]
    pub recommendation_weight: f64,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Newsletter {
    /// Geographic target, if the audience declares one
    pub fn geographic(&self) -> Option<&GeographicTarget> {
        self.target_audience
            .as_ref()
            .and_then(|audience| audience.geographic.as_ref())
    }
}

fn default_recommendation_weight() -> f64 { 1.0 }

/// Structured audience attributes; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAudience {
    #[serde(default)]
    pub age_range: Option<NumericRange>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub geographic: Option<GeographicTarget>,
    #[serde(default)]
    pub income_range: Option<NumericRange>,
}

/// Inclusive numeric range, e.g. an age or income bracket
///
/// A missing `min` reads as 0 and a missing `max` as 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicTarget {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}
