// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use filters::{is_eligible_candidate, CandidateFilter};
pub use matcher::{MatchingService, MatchingError, ALGORITHM_VERSION};
pub use scoring::{
    calculate_match_score, calculate_category_alignment, calculate_audience_compatibility,
    calculate_performance_history, calculate_geographic_alignment, calculate_seasonal_relevance,
    calculate_competition_level, FactorScores,
};
pub use similarity::{jaccard_similarity, range_overlap, size_ratio};
