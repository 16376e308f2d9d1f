use biota_core::config::CascadeConfig;
use biota_core::notify::NullSink;
use biota_core::systems::CascadePropagator;
use biota_core::trophic::TrophicRegistry;
use biota_data::TrophicLevel;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Layered web with `width` types per level, every type eating every type
/// one level below.
fn layered_registry(width: usize) -> TrophicRegistry {
    let mut registry = TrophicRegistry::new();
    let levels = [
        TrophicLevel::Producer,
        TrophicLevel::Primary,
        TrophicLevel::Secondary,
        TrophicLevel::Tertiary,
    ];
    let mut below: Vec<String> = Vec::new();
    for level in levels {
        let names: Vec<String> = (0..width).map(|i| format!("{level}_{i}")).collect();
        let prey: &[String] = if level.is_base() { &[] } else { &below };
        for name in &names {
            registry
                .register_type(name, level, prey)
                .expect("valid registration");
        }
        below = names;
    }
    registry
}

fn bench_cascade_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_walk");
    let config = CascadeConfig::default();

    for width in [2usize, 8, 32] {
        let registry = layered_registry(width);
        let propagator = CascadePropagator::new(&registry, &config);
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                let effects = propagator.propagate(black_box("primary_0"), "bench", &mut NullSink);
                black_box(effects)
            })
        });
    }
    group.finish();
}

fn bench_deep_cascade(c: &mut Criterion) {
    let registry = layered_registry(16);
    let config = CascadeConfig {
        max_depth: 16,
        decay: 1.0,
        ..Default::default()
    };
    let propagator = CascadePropagator::new(&registry, &config);

    c.bench_function("cascade_deep", |b| {
        b.iter(|| black_box(propagator.propagate("producer_0", "bench", &mut NullSink)))
    });
}

criterion_group!(benches, bench_cascade_walk, bench_deep_cascade);
criterion_main!(benches);
