use criterion::{criterion_group, criterion_main, Criterion, black_box};
use qgolden::mem::Matrix;
use qgolden::model::{Params, HIDDEN, IN_DIM, OUT};
use qgolden::GoldenNetwork;

fn make_random_params() -> Params {
    let mut seed = 0x1234_5678_9abc_def0u64;
    let mut next = |range: i64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((seed >> 33) as i64 % (2 * range + 1)) - range
    };
    Params {
        w1: Matrix::from_fn(IN_DIM, HIDDEN, |_, _| next(127)),
        b1: (0..HIDDEN).map(|_| next(4096)).collect(),
        w2: Matrix::from_fn(HIDDEN, OUT, |_, _| next(127)),
        b2: (0..OUT).map(|_| next(4096)).collect(),
    }
}

fn bench_infer(c: &mut Criterion) {
    let net = GoldenNetwork::new(make_random_params()).unwrap();
    let bus: Vec<u8> = (0..IN_DIM as u32).map(|i| (i * 37 % 256) as u8).collect();
    c.bench_function("golden_infer_single", |b| {
        b.iter(|| black_box(net.infer(black_box(&bus)).unwrap()))
    });

    let batch: Vec<Vec<u8>> = (0..1024u32).map(|k| (0..IN_DIM as u32).map(|i| ((i * 37 + k * 11) % 256) as u8).collect()).collect();
    c.bench_function("golden_infer_batch_1024", |b| {
        b.iter(|| black_box(net.infer_batch(black_box(&batch)).unwrap()))
    });
}

criterion_group!(benches, bench_infer);
criterion_main!(benches);
