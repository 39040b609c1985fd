use std::collections::HashSet;
use crate::models::Newsletter;

/// Candidates must reach this share of the source's subscriber count
pub const MIN_SUBSCRIBER_RATIO: f64 = 0.10;

/// Caller-supplied restrictions on the candidate pool
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub exclude_organizations: HashSet<String>,
    /// OR semantics; empty means every category is allowed
    pub include_categories: HashSet<String>,
}

/// Check whether a candidate may be recommended to the source at all
///
/// This runs before any scoring. All rules must hold:
/// - the candidate has an id and is not the source itself
/// - the candidate belongs to a different organization (tenancy isolation)
/// - the candidate's organization is not excluded
/// - the candidate is active for recommendations
/// - the candidate has at least 10% of the source's subscribers
/// - the candidate shares a category with `include_categories`, if given
#[inline]
pub fn is_eligible_candidate(
    candidate: &Newsletter,
    source: &Newsletter,
    filter: &CandidateFilter,
) -> bool {
    if candidate.id.is_empty() || candidate.id == source.id {
        return false;
    }

    if candidate.organization_id == source.organization_id {
        return false;
    }

    if filter.exclude_organizations.contains(&candidate.organization_id) {
        return false;
    }

    if !candidate.is_active_for_recommendations {
        return false;
    }

    if !meets_subscriber_floor(candidate.subscriber_count, source.subscriber_count) {
        return false;
    }

    if !filter.include_categories.is_empty()
        && !candidate
            .categories
            .iter()
            .any(|category| filter.include_categories.contains(category))
    {
        return false;
    }

    true
}

/// Floor only; larger candidates always pass
#[inline]
fn meets_subscriber_floor(candidate_count: u64, source_count: u64) -> bool {
    candidate_count as f64 >= source_count as f64 * MIN_SUBSCRIBER_RATIO
}
