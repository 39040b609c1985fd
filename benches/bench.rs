// Criterion benchmarks for Newsletter Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use newsletter_match::core::{calculate_audience_compatibility, calculate_category_alignment, MatchingService};
use newsletter_match::models::{GeographicTarget, MatchingAlgorithmInput, MatchingCriteria, Newsletter, NumericRange, TargetAudience};

const CATEGORIES: &[&str] = &[
    "Technology", "Programming", "AI", "Startups", "Business",
    "Design", "Marketing", "Finance", "Health", "Travel",
];

fn create_candidate(id: usize) -> Newsletter {
    Newsletter {
        id: format!("nl-{}", id),
        title: format!("Newsletter {}", id),
        description: None,
        client_id: format!("client-{}", id),
        organization_id: format!("org-{}", id % 50 + 1),
        categories: (0..3)
            .map(|k| CATEGORIES[(id + k * 3) % CATEGORIES.len()].to_string())
            .collect(),
        target_audience: Some(TargetAudience {
            age_range: Some(NumericRange::new(18.0 + (id % 15) as f64, 45.0 + (id % 20) as f64)),
            interests: Some(vec!["technology".to_string(), "business".to_string()]),
            geographic: Some(GeographicTarget {
                country: Some(if id % 2 == 0 { "US" } else { "UK" }.to_string()),
                region: None,
            }),
            income_range: None,
        }),
        subscriber_count: 1000 + (id as u64 * 37) % 50000,
        average_open_rate: Some(10.0 + (id % 30) as f64),
        is_active_for_recommendations: id % 9 != 0,
        recommendation_weight: 1.0,
        created_at: None,
        updated_at: None,
    }
}

fn create_source() -> Newsletter {
    let mut source = create_candidate(0);
    source.id = "source".to_string();
    source.organization_id = "org-0".to_string();
    source.subscriber_count = 10000;
    source
}

fn bench_category_alignment(c: &mut Criterion) {
    let source = create_source();
    let candidate = create_candidate(7);

    c.bench_function("category_alignment", |b| {
        b.iter(|| calculate_category_alignment(black_box(&source), black_box(&candidate)));
    });
}

fn bench_audience_compatibility(c: &mut Criterion) {
    let source = create_source();
    let candidate = create_candidate(7);

    c.bench_function("audience_compatibility", |b| {
        b.iter(|| calculate_audience_compatibility(black_box(&source), black_box(&candidate)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let service = MatchingService::with_default_criteria();
    let source = create_source();
    let criteria = MatchingCriteria {
        min_match_score: 0.0,
        ..MatchingCriteria::default()
    };

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Newsletter> = (1..=*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    let input = MatchingAlgorithmInput::new(
                        source.clone(),
                        black_box(candidates.clone()),
                        criteria,
                    );
                    tokio_test::block_on(service.find_matches(input))
                });
            },
        );
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = MatchingService::with_default_criteria();
    let candidates: Vec<Newsletter> = (1..=1000).map(create_candidate).collect();
    let sources: Vec<Newsletter> = candidates.iter().take(3).cloned().collect();

    c.bench_function("batch_find_matches_3_sources_1000_candidates", |b| {
        b.iter(|| {
            runtime.block_on(service.batch_find_matches(
                black_box(sources.clone()),
                black_box(candidates.clone()),
                None,
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_category_alignment,
    bench_audience_compatibility,
    bench_matching,
    bench_batch
);

criterion_main!(benches);
