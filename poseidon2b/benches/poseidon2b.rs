use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use p2b_poseidon2b::{Family, InstanceConfig, Poseidon2bPermutation, STANDARD_INSTANCES};
use p2b_symmetric::Permutation;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_poseidon2b(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    for family in [Family::Poseidon2b, Family::Poseidonb] {
        let mut group = c.benchmark_group(family.name());
        for (degree, width) in STANDARD_INSTANCES {
            let mut config = InstanceConfig::new(family, degree, width);
            if config.resolved_rounds().is_none() {
                // No published numbers; fixed here so the layers can still be compared.
                config = config.with_rounds(8, 30);
            }
            for optimized in [false, true] {
                let perm =
                    Poseidon2bPermutation::new(config.clone().with_optimized_constants(optimized))
                        .unwrap();
                let input: Vec<_> = (0..width)
                    .map(|_| perm.field().random_element(&mut rng))
                    .collect();
                let id = BenchmarkId::new(
                    if optimized { "optimized" } else { "plain" },
                    format!("{degree}x{width}"),
                );
                group.bench_with_input(id, &input, |b, input| {
                    b.iter(|| perm.permute(input.clone()))
                });
            }
        }
        group.finish();
    }
}

fn bench_toy_generation(c: &mut Criterion) {
    c.bench_function("toy_instance_gf8_5", |b| {
        b.iter(|| {
            Poseidon2bPermutation::new(
                InstanceConfig::toy(Family::Poseidon2b, 8, 5).with_rounds(8, 10),
            )
        })
    });
}

criterion_group!(benches, bench_poseidon2b, bench_toy_generation);
criterion_main!(benches);
