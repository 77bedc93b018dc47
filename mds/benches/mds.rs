use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use p2b_field::{BinaryElement, BinaryField};
use p2b_matrix::DenseMatrix;
use p2b_mds::{is_mds, m4_matrix, subspace_trail};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_mds");
    for degree in [32, 64, 128] {
        let f = BinaryField::standard(degree).unwrap();
        let m4 = m4_matrix(&f);
        group.bench_with_input(BenchmarkId::new("m4", degree), &m4, |b, m| {
            b.iter(|| is_mds(&f, m))
        });
        let row: Vec<_> = [1, 1, 2, 3, 5, 7].map(BinaryElement::new).to_vec();
        let circ = DenseMatrix::circulant(&row);
        group.bench_with_input(BenchmarkId::new("circulant6", degree), &circ, |b, m| {
            b.iter(|| is_mds(&f, m))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("subspace_trail");
    let mut rng = SmallRng::seed_from_u64(1);
    for (degree, width) in [(32, 16), (32, 24), (64, 12), (128, 6)] {
        let f = BinaryField::standard(degree).unwrap();
        let diag: Vec<_> = (0..width).map(|_| f.random_element(&mut rng)).collect();
        let m = DenseMatrix::ones_plus_diagonal(&diag);
        group.bench_with_input(
            BenchmarkId::new(format!("GF(2^{degree})"), width),
            &m,
            |b, m| b.iter(|| subspace_trail(&f, m)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
