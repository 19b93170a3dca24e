// Criterion benchmarks for Venture Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use venture_match::core::{calculate_default_match_score, InMemoryProfileStore, MatchGenerator};
use venture_match::models::{BusinessModel, InvestorProfile, Role, StartupProfile, StartupStage};

const INDUSTRIES: &[&str] = &["Technology", "Health", "Fintech", "Retail", "Energy"];
const ROUNDS: &[&str] = &["Pre-seed", "Seed", "Series A", "Series B", "Series C"];
const MODELS: &[&str] = &["B2B", "B2C", "SaaS", "Marketplace"];

fn create_startup() -> StartupProfile {
    StartupProfile {
        id: "startup".to_string(),
        user_id: "founder".to_string(),
        name: Some("Bench Startup".to_string()),
        status: Some("published".to_string()),
        industry: vec!["Technology".to_string(), "Health".to_string()],
        stage: Some(StartupStage::Mvp),
        business_model: Some(BusinessModel::Saas),
        target_amount: Some(750_000.0),
    }
}

fn create_investor(id: usize) -> InvestorProfile {
    InvestorProfile {
        id: format!("investor_{}", id),
        user_id: format!("user_{}", id),
        name: None,
        status: Some("active".to_string()),
        investment_industries: vec![INDUSTRIES[id % INDUSTRIES.len()].to_string()],
        investment_stages: vec![ROUNDS[id % ROUNDS.len()].to_string()],
        business_models: vec![MODELS[id % MODELS.len()].to_string()],
        check_size_min: Some(100.0 + (id % 5) as f64 * 100.0),
        check_size_max: Some(1000.0),
        investment_geographies: if id % 3 == 0 { vec!["Global".to_string()] } else { vec![] },
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let startup = create_startup();
    let investor = create_investor(1);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_default_match_score(black_box(&startup), black_box(&investor)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let generator = MatchGenerator::with_default_weights();
    let startup = create_startup();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let investors: Vec<InvestorProfile> = (0..*candidate_count).map(create_investor).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_investors", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| generator.rank_investors(black_box(&startup), black_box(investors.clone())));
            },
        );
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let generator = MatchGenerator::with_default_weights();
    let store = InMemoryProfileStore::new(
        vec![create_startup()],
        (0..1000).map(create_investor).collect(),
    );

    c.bench_function("generate_matches_1000_candidates", |b| {
        b.iter(|| {
            runtime.block_on(generator.generate_matches(black_box(&store), "founder", Role::Startup))
        });
    });
}

criterion_group!(benches, bench_score_pair, bench_ranking, bench_generate);

criterion_main!(benches);
