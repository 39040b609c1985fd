// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Newsletter, TargetAudience, NumericRange, GeographicTarget};
pub use requests::{MatchingCriteria, CriteriaOverrides, MatchingAlgorithmInput};
pub use responses::{RecommendationMatch, MatchMetadata, MatchingResult};
