//! Newsletter Match - recommendation matching engine for newsletter cross-promotion
//!
//! Given a source newsletter and a pool of candidates from other organizations,
//! this library filters out ineligible candidates, scores the rest across six
//! weighted factors and returns a ranked, truncated list of matches.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use crate::core::{MatchingService, MatchingError, ALGORITHM_VERSION, calculate_category_alignment, calculate_audience_compatibility};
pub use crate::models::{Newsletter, TargetAudience, MatchingCriteria, CriteriaOverrides, MatchingAlgorithmInput, MatchingResult, RecommendationMatch};
