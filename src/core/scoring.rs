use crate::models::{MatchingCriteria, Newsletter, TargetAudience};
use crate::core::similarity::{jaccard_similarity, label_set, range_overlap, size_ratio};

/// Score used wherever a factor has nothing to compare
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Weight of the source-relative exact-match bonus in category alignment.
/// One shared category out of three on the source adds 0.2.
const EXACT_MATCH_BONUS: f64 = 0.6;

const SEASONAL_KEYWORDS: [&str; 4] = ["seasonal", "holiday", "events", "weather"];

/// Zero-based months (Nov through Mar) in which seasonal content peaks
const IN_SEASON_MONTHS: [u32; 5] = [10, 11, 0, 1, 2];

/// Per-factor scores for one source/candidate pair, each 0-100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub category_alignment: f64,
    pub audience_compatibility: f64,
    pub performance_history: f64,
    pub geographic_alignment: f64,
    pub seasonal_relevance: f64,
    pub competition_level: f64,
}

impl FactorScores {
    pub fn compute(source: &Newsletter, candidate: &Newsletter, reference_month: u32) -> Self {
        let category_alignment = calculate_category_alignment(source, candidate);

        Self {
            category_alignment,
            audience_compatibility: calculate_audience_compatibility(source, candidate),
            performance_history: gated_performance(candidate, category_alignment),
            geographic_alignment: calculate_geographic_alignment(source, candidate),
            seasonal_relevance: seasonal_from_alignment(
                source,
                candidate,
                reference_month,
                category_alignment,
            ),
            competition_level: competition_from_alignment(category_alignment),
        }
    }

    /// Weighted mean of the factors, normalized by the weight sum
    ///
    /// Clamped to 0-100 and rounded to two decimals. A non-positive or NaN
    /// weight sum scores 0.
    pub fn composite(&self, criteria: &MatchingCriteria) -> f64 {
        let total_weight = criteria.weight_sum();
        if total_weight.is_nan() || total_weight <= 0.0 {
            return 0.0;
        }

        let weighted = self.category_alignment * criteria.category_weight
            + self.audience_compatibility * criteria.audience_compatibility_weight
            + self.performance_history * criteria.performance_history_weight
            + self.geographic_alignment * criteria.geographic_weight
            + self.seasonal_relevance * criteria.seasonal_weight
            + self.competition_level * criteria.competition_weight;

        let score = (weighted / total_weight).clamp(0.0, 100.0);
        (score * 100.0).round() / 100.0
    }
}

/// Calculate the composite match score (0-100) for a candidate
///
/// Scoring formula, normalized by the sum of the weights:
/// score = (
///     category_alignment     * category_weight +
///     audience_compatibility * audience_compatibility_weight +
///     performance_history    * performance_history_weight +
///     geographic_alignment   * geographic_weight +
///     seasonal_relevance     * seasonal_weight +
///     competition_level      * competition_weight
/// ) / sum(weights)
pub fn calculate_match_score(
    source: &Newsletter,
    candidate: &Newsletter,
    criteria: &MatchingCriteria,
    reference_month: u32,
) -> (f64, FactorScores) {
    let factors = FactorScores::compute(source, candidate, reference_month);
    (factors.composite(criteria), factors)
}

/// Calculate category alignment (0-100)
///
/// Jaccard similarity plus a bonus proportional to how much of the
/// source's own category set the candidate covers. Either side having no
/// categories scores 0.
pub fn calculate_category_alignment(source: &Newsletter, candidate: &Newsletter) -> f64 {
    let source_set = label_set(&source.categories);
    let candidate_set = label_set(&candidate.categories);

    if source_set.is_empty() || candidate_set.is_empty() {
        return 0.0;
    }

    let shared = source_set.intersection(&candidate_set).count() as f64;
    let union = source_set.union(&candidate_set).count() as f64;

    let jaccard = shared / union;
    let exact_match_bonus = EXACT_MATCH_BONUS * shared / source_set.len() as f64;

    ((jaccard + exact_match_bonus) * 100.0).clamp(0.0, 100.0)
}

/// Calculate audience compatibility (0-100)
///
/// Blend of subscriber-size similarity (30%), open-rate similarity (40%)
/// and declared target-audience overlap (30%).
pub fn calculate_audience_compatibility(source: &Newsletter, candidate: &Newsletter) -> f64 {
    let size_score = size_ratio(source.subscriber_count, candidate.subscriber_count) * 100.0;
    let engagement_score =
        engagement_compatibility(source.average_open_rate, candidate.average_open_rate);
    let overlap_score = target_audience_overlap(
        source.target_audience.as_ref(),
        candidate.target_audience.as_ref(),
    );

    (size_score * 0.3 + engagement_score * 0.4 + overlap_score * 0.3).clamp(0.0, 100.0)
}

/// Calculate performance history (0-100)
///
/// The candidate's own track record, counted only in proportion to its
/// category alignment with the source.
pub fn calculate_performance_history(source: &Newsletter, candidate: &Newsletter) -> f64 {
    gated_performance(candidate, calculate_category_alignment(source, candidate))
}

/// Calculate geographic alignment (0-100)
pub fn calculate_geographic_alignment(source: &Newsletter, candidate: &Newsletter) -> f64 {
    let (Some(source_geo), Some(candidate_geo)) = (source.geographic(), candidate.geographic())
    else {
        return NEUTRAL_SCORE;
    };

    let mut score = match (&source_geo.country, &candidate_geo.country) {
        (Some(a), Some(b)) if a == b => 70.0,
        (Some(_), Some(_)) => 0.0,
        _ => NEUTRAL_SCORE,
    };

    if let (Some(a), Some(b)) = (&source_geo.region, &candidate_geo.region) {
        if a == b {
            score += 30.0;
        }
    }

    score.min(100.0)
}

/// Calculate seasonal relevance (0-100) for a zero-based month
///
/// Pairs with no category in common score 0 regardless of season.
pub fn calculate_seasonal_relevance(
    source: &Newsletter,
    candidate: &Newsletter,
    reference_month: u32,
) -> f64 {
    seasonal_from_alignment(
        source,
        candidate,
        reference_month,
        calculate_category_alignment(source, candidate),
    )
}

#[inline]
fn seasonal_from_alignment(
    source: &Newsletter,
    candidate: &Newsletter,
    reference_month: u32,
    category_alignment: f64,
) -> f64 {
    if category_alignment <= 0.0 {
        return 0.0;
    }

    match (has_seasonal_content(source), has_seasonal_content(candidate)) {
        (true, true) if IN_SEASON_MONTHS.contains(&reference_month) => 80.0,
        (true, true) => 60.0,
        (true, false) | (false, true) => 40.0,
        (false, false) => NEUTRAL_SCORE,
    }
}

/// Calculate competition level (0-100); higher means less head-to-head competition
pub fn calculate_competition_level(source: &Newsletter, candidate: &Newsletter) -> f64 {
    competition_from_alignment(calculate_category_alignment(source, candidate))
}

#[inline]
fn competition_from_alignment(category_alignment: f64) -> f64 {
    if category_alignment <= 0.0 {
        // Unrelated topics share no crossover audience
        0.0
    } else if category_alignment > 80.0 {
        30.0
    } else if category_alignment > 50.0 {
        60.0
    } else {
        90.0
    }
}

#[inline]
fn gated_performance(candidate: &Newsletter, category_alignment: f64) -> f64 {
    (track_record(candidate) * category_alignment / 100.0).clamp(0.0, 100.0)
}

/// Candidate quality from open rate and reach, independent of the source
fn track_record(candidate: &Newsletter) -> f64 {
    let open_rate = candidate.average_open_rate.unwrap_or(0.0).max(0.0);
    let engagement = (open_rate * 2.5).min(100.0);
    let reach = ((candidate.subscriber_count as f64 + 1.0).log10() * 20.0).min(100.0);
    let consistency_bonus = if open_rate > 20.0 { 10.0 } else { 0.0 };

    (engagement * 0.6 + reach * 0.4 + consistency_bonus).min(100.0)
}

#[inline]
fn engagement_compatibility(source_rate: Option<f64>, candidate_rate: Option<f64>) -> f64 {
    match (source_rate, candidate_rate) {
        (Some(a), Some(b)) => 100.0 - ((a - b).abs() * 2.0).min(100.0),
        _ => NEUTRAL_SCORE,
    }
}

/// Mean of the age, interest and income overlaps both sides declare
fn target_audience_overlap(
    source: Option<&TargetAudience>,
    candidate: Option<&TargetAudience>,
) -> f64 {
    let (Some(source), Some(candidate)) = (source, candidate) else {
        return NEUTRAL_SCORE;
    };

    let mut total = 0.0;
    let mut factors = 0u32;

    if let (Some(a), Some(b)) = (&source.age_range, &candidate.age_range) {
        total += range_overlap(a, b);
        factors += 1;
    }

    if let (Some(a), Some(b)) = (&source.interests, &candidate.interests) {
        total += jaccard_similarity(a, b) * 100.0;
        factors += 1;
    }

    if let (Some(a), Some(b)) = (&source.income_range, &candidate.income_range) {
        total += range_overlap(a, b);
        factors += 1;
    }

    if factors == 0 {
        NEUTRAL_SCORE
    } else {
        total / factors as f64
    }
}

fn has_seasonal_content(newsletter: &Newsletter) -> bool {
    newsletter.categories.iter().any(|category| {
        let category = category.to_lowercase();
        SEASONAL_KEYWORDS
            .iter()
            .any(|keyword| category.contains(keyword))
    })
}
