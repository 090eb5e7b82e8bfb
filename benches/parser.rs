//! Benchmarks for ability parsing and card registration.
//!
//! Run with: `cargo bench --bench parser`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_duel::cards::{CardDefinition, CardId, CardRegistry, CardType};
use rust_duel::effects::{parse_ability, parse_multi_part_ability};

const ABILITIES: [(&str, &str); 5] = [
    ("draw", "Draw 2 cards."),
    ("trigger", "When summoned: Deal 500 damage."),
    ("protection", "Cannot be destroyed by battle or card effects."),
    (
        "multi_part",
        "Cannot be targeted by card effects. All Dragon-Type monsters gain 500 ATK. \
         During each End Phase: Gain 300 LP.",
    ),
    ("flavor", "It sleeps beneath the mountain, dreaming of fire."),
];

/// Benchmark single and multi-part parsing per ability shape.
fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse");
    for (label, text) in ABILITIES {
        group.bench_with_input(BenchmarkId::new("multi_part", label), &text, |b, text| {
            b.iter(|| black_box(parse_multi_part_ability(black_box(text))));
        });
        group.bench_with_input(BenchmarkId::new("single", label), &text, |b, text| {
            b.iter(|| black_box(parse_ability(black_box(text))));
        });
    }
    group.finish();
}

/// Benchmark registering a card pool, which parses every ability once.
fn benchmark_registry(c: &mut Criterion) {
    let definitions: Vec<CardDefinition> = (0..200u32)
        .map(|i| {
            let (_, text) = ABILITIES[i as usize % ABILITIES.len()];
            CardDefinition::new(CardId::new(i), format!("Card {i}"), CardType::Creature)
                .with_stats(1000, 1000)
                .with_level(4)
                .with_ability(text)
        })
        .collect();

    c.bench_function("register_200_cards", |b| {
        b.iter(|| {
            let mut registry = CardRegistry::new();
            for definition in &definitions {
                registry.register(definition.clone());
            }
            black_box(registry)
        });
    });
}

criterion_group!(benches, benchmark_parse, benchmark_registry);
criterion_main!(benches);
