use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};
use validator::Validate;
use crate::models::{
    CriteriaOverrides, MatchMetadata, MatchingAlgorithmInput, MatchingCriteria, MatchingResult,
    Newsletter, RecommendationMatch,
};
use crate::core::{
    filters::{is_eligible_candidate, CandidateFilter},
    scoring::calculate_match_score,
};

/// Identifies the scoring semantics; bump whenever they change
pub const ALGORITHM_VERSION: &str = "1.0.0";

/// Clock granularity can report zero for tiny pools
const MIN_PROCESSING_TIME_MS: f64 = 0.001;

/// Errors that can occur inside a matching run
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Invalid source newsletter: {0}")]
    InvalidSource(#[from] validator::ValidationErrors),

    #[error("Matching task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Newsletter recommendation matcher
///
/// # Pipeline Stages
/// 1. Candidate eligibility filtering (self, tenancy, activity, size, categories)
/// 2. Per-factor scoring
/// 3. Weighted composite and score threshold
/// 4. Ranking and truncation
///
/// The service holds no mutable state; clones are cheap and independent.
#[derive(Debug, Clone)]
pub struct MatchingService {
    base_criteria: MatchingCriteria,
}

impl MatchingService {
    /// Create a service whose batch runs start from `base_criteria`
    pub fn new(base_criteria: MatchingCriteria) -> Self {
        Self { base_criteria }
    }

    pub fn with_default_criteria() -> Self {
        Self {
            base_criteria: MatchingCriteria::default(),
        }
    }

    /// The documented default weights and limits
    pub fn default_criteria(&self) -> MatchingCriteria {
        MatchingCriteria::default()
    }

    /// Criteria that batch runs layer their overrides on
    pub fn base_criteria(&self) -> MatchingCriteria {
        self.base_criteria
    }

    /// Find and rank recommendation matches for one source newsletter
    ///
    /// Never fails: an invalid source yields an empty result.
    pub async fn find_matches(&self, input: MatchingAlgorithmInput) -> MatchingResult {
        let started = Instant::now();

        let MatchingAlgorithmInput {
            source_newsletter,
            candidate_newsletters,
            criteria,
            exclude_organizations,
            include_categories,
            reference_time,
        } = input;

        let filter = CandidateFilter {
            exclude_organizations,
            include_categories,
        };
        let reference_time = reference_time.unwrap_or_else(Utc::now);

        match evaluate(
            &source_newsletter,
            &candidate_newsletters,
            &criteria,
            &filter,
            reference_time,
            started,
        ) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping matching for source {:?}: {}", source_newsletter.id, e);
                degenerate_result(started)
            }
        }
    }

    /// Run [`Self::find_matches`] for every source against a shared pool
    ///
    /// Each source runs on its own blocking task, so total time tracks the
    /// slowest source rather than the sum. Results are keyed by the literal
    /// source id. A source that fails still gets an entry with no matches,
    /// and its siblings are unaffected.
    pub async fn batch_find_matches(
        &self,
        sources: Vec<Newsletter>,
        candidates: Vec<Newsletter>,
        overrides: Option<CriteriaOverrides>,
    ) -> HashMap<String, MatchingResult> {
        let criteria = overrides.unwrap_or_default().apply(self.base_criteria);
        let pool: Arc<[Newsletter]> = candidates.into();
        let reference_time = Utc::now();

        info!(
            "Batch matching {} sources against {} candidates",
            sources.len(),
            pool.len()
        );

        let handles: Vec<_> = sources
            .into_iter()
            .map(|source| {
                let pool = Arc::clone(&pool);
                let source_id = source.id.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    let started = Instant::now();
                    let filter = CandidateFilter::default();
                    evaluate(&source, &pool, &criteria, &filter, reference_time, started)
                        .map_err(|e| (e, started))
                });

                (source_id, handle)
            })
            .collect();

        let mut results = HashMap::with_capacity(handles.len());

        for (source_id, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err((e, started))) => {
                    warn!("Skipping matching for source {:?}: {}", source_id, e);
                    degenerate_result(started)
                }
                Err(join_error) => {
                    let e = MatchingError::from(join_error);
                    error!("Matching for source {:?} did not complete: {}", source_id, e);
                    degenerate_result(Instant::now())
                }
            };

            results.insert(source_id, result);
        }

        info!("Batch matching finished for {} sources", results.len());

        results
    }
}

impl Default for MatchingService {
    fn default() -> Self {
        Self::with_default_criteria()
    }
}

/// Filter, score, threshold, rank and truncate one source's candidates
fn evaluate(
    source: &Newsletter,
    candidates: &[Newsletter],
    criteria: &MatchingCriteria,
    filter: &CandidateFilter,
    reference_time: DateTime<Utc>,
    started: Instant,
) -> Result<MatchingResult, MatchingError> {
    source.validate()?;

    let reference_month = reference_time.month0();
    let generated_at = Utc::now();

    let eligible: Vec<&Newsletter> = candidates
        .iter()
        .filter(|candidate| {
            let eligible = is_eligible_candidate(candidate, source, filter);
            if !eligible {
                trace!("Candidate {:?} filtered out for source {}", candidate.id, source.id);
            }
            eligible
        })
        .collect();

    let total_candidates = eligible.len();

    let mut matches: Vec<RecommendationMatch> = eligible
        .into_iter()
        .filter_map(|candidate| {
            let (match_score, factors) =
                calculate_match_score(source, candidate, criteria, reference_month);

            if match_score < criteria.min_match_score {
                return None;
            }

            Some(RecommendationMatch {
                id: format!("match-{}-{}", source.id, candidate.id),
                from_newsletter_id: source.id.clone(),
                to_newsletter_id: candidate.id.clone(),
                match_score,
                category_alignment: factors.category_alignment,
                audience_compatibility: factors.audience_compatibility,
                performance_history: factors.performance_history,
                geographic_alignment: factors.geographic_alignment,
                seasonal_relevance: factors.seasonal_relevance,
                competition_level: factors.competition_level,
                is_auto_generated: true,
                last_calculated: generated_at,
                metadata: MatchMetadata {
                    algorithm_version: ALGORITHM_VERSION.to_string(),
                    criteria: *criteria,
                    generated_at,
                },
            })
        })
        .collect();

    // Sort by score (descending), ties by candidate id
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.to_newsletter_id.cmp(&b.to_newsletter_id))
    });

    matches.truncate(criteria.suggestion_limit());

    let processing_time_ms = elapsed_ms(started);

    debug!(
        "Source {}: {} matches from {} eligible of {} candidates in {:.3}ms",
        source.id,
        matches.len(),
        total_candidates,
        candidates.len(),
        processing_time_ms
    );

    Ok(MatchingResult {
        matches,
        total_candidates,
        processing_time_ms,
        algorithm_version: ALGORITHM_VERSION.to_string(),
    })
}

fn degenerate_result(started: Instant) -> MatchingResult {
    MatchingResult {
        matches: Vec::new(),
        total_candidates: 0,
        processing_time_ms: elapsed_ms(started),
        algorithm_version: ALGORITHM_VERSION.to_string(),
    }
}

#[inline]
fn elapsed_ms(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0).max(MIN_PROCESSING_TIME_MS)
}
