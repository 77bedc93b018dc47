use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use p2b_field::{BinaryField, inverse_exponent};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_field(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    for degree in [32, 64, 128] {
        let f = BinaryField::standard(degree).unwrap();
        let a = f.random_element(&mut rng);
        let b = f.random_element(&mut rng);
        let alpha_inv = inverse_exponent(7, degree).unwrap();

        c.bench_function(&format!("GF(2^{degree}) mul"), |bench| {
            bench.iter(|| f.mul(black_box(a), black_box(b)))
        });
        c.bench_function(&format!("GF(2^{degree}) x^7"), |bench| {
            bench.iter(|| f.exp_u128(black_box(a), 7))
        });
        c.bench_function(&format!("GF(2^{degree}) x^(1/7)"), |bench| {
            bench.iter(|| f.exp_u128(black_box(a), alpha_inv))
        });
        c.bench_function(&format!("GF(2^{degree}) inverse"), |bench| {
            bench.iter(|| f.try_inverse(black_box(a)))
        });
    }
}

criterion_group!(benches, bench_field);
criterion_main!(benches);
