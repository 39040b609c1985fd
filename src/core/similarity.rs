use std::collections::HashSet;
use crate::models::NumericRange;

/// Distinct, case-sensitive labels of a sequence
#[inline]
pub fn label_set(labels: &[String]) -> HashSet<&str> {
    labels.iter().map(String::as_str).collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` over two label sequences (0-1)
///
/// Duplicates collapse; two empty sequences score 0.
pub fn jaccard_similarity(a: &[String], b: &[String]) -> f64 {
    let a = label_set(a);
    let b = label_set(b);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(&b).count() as f64 / union as f64
}

/// Overlap of two numeric ranges as a share of their combined span (0-100)
///
/// Ranges that only touch, or do not meet at all, overlap by 0.
pub fn range_overlap(a: &NumericRange, b: &NumericRange) -> f64 {
    let overlap_start = a.lower().max(b.lower());
    let overlap_end = a.upper().min(b.upper());

    if overlap_start >= overlap_end {
        return 0.0;
    }

    let span = a.upper().max(b.upper()) - a.lower().min(b.lower());
    if span <= 0.0 {
        return 0.0;
    }

    ((overlap_end - overlap_start) / span * 100.0).clamp(0.0, 100.0)
}

/// Ratio of the smaller to the larger count (0-1)
///
/// Two empty lists are the same size.
#[inline]
pub fn size_ratio(a: u64, b: u64) -> f64 {
    let larger = a.max(b);
    if larger == 0 {
        return 1.0;
    }
    a.min(b) as f64 / larger as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard_similarity() {
        let a = labels(&["Technology", "Programming", "AI"]);
        let b = labels(&["Technology", "Startups", "Business"]);

        let similarity = jaccard_similarity(&a, &b);
        assert!((similarity - 0.2).abs() < 1e-9, "Expected 1/5, got {}", similarity);
    }

    #[test]
    fn test_jaccard_ignores_duplicates() {
        let a = labels(&["Technology", "Technology"]);
        let b = labels(&["Technology"]);

        assert_eq!(jaccard_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_jaccard_is_case_sensitive() {
        let a = labels(&["technology"]);
        let b = labels(&["Technology"]);

        assert_eq!(jaccard_similarity(&a, &b), 0.0);
        assert_eq!(jaccard_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_range_overlap() {
        // 30-45 shared out of a 25-50 span
        let overlap = range_overlap(&NumericRange::new(25.0, 45.0), &NumericRange::new(30.0, 50.0));
        assert!((overlap - 60.0).abs() < 1e-9);

        // Touching ranges do not overlap
        let touching = range_overlap(&NumericRange::new(25.0, 45.0), &NumericRange::new(45.0, 65.0));
        assert_eq!(touching, 0.0);

        let identical = range_overlap(&NumericRange::new(20.0, 30.0), &NumericRange::new(20.0, 30.0));
        assert_eq!(identical, 100.0);
    }

    #[test]
    fn test_range_overlap_open_bounds() {
        let open = NumericRange::default();
        let upper_half = NumericRange { min: Some(50.0), max: None };

        assert_eq!(range_overlap(&open, &upper_half), 50.0);
    }

    #[test]
    fn test_size_ratio() {
        assert_eq!(size_ratio(8000, 10000), 0.8);
        assert_eq!(size_ratio(10000, 8000), 0.8);
        assert_eq!(size_ratio(0, 0), 1.0);
        assert_eq!(size_ratio(0, 10), 0.0);
    }
}
