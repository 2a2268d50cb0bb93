//! Cryptography benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pidpys_crypto::hash::kupyna_256;
use pidpys_crypto::{Dstu4145, HybridScheme};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_kupyna(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash/kupyna-256");

    for size in [1024, 65536, 1048576] {
        let data = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("{} bytes", size), &data, |b, data| {
            b.iter(|| kupyna_256(black_box(data)));
        });
    }

    group.finish();
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/gf2m-257");
    let mut rng = StdRng::seed_from_u64(1);
    let field = pidpys_crypto::field::field_257();
    let a = field.random_element(&mut rng);
    let b = field.random_element(&mut rng);

    group.bench_function("mul", |bench| {
        bench.iter(|| field.mul(black_box(&a), black_box(&b)));
    });
    group.bench_function("inverse", |bench| {
        bench.iter(|| field.inverse(black_box(&a)).unwrap());
    });
    group.bench_function("trace", |bench| {
        bench.iter(|| field.trace(black_box(&a)));
    });

    group.finish();
}

fn bench_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/m257");
    group.sample_size(20);
    let params = pidpys_crypto::DomainParams::m257();

    group.bench_function("scalar-mul", |bench| {
        bench.iter(|| {
            params
                .curve()
                .mul(black_box(params.order()), black_box(params.base()))
        });
    });

    group.finish();
}

fn bench_dstu(c: &mut Criterion) {
    let mut group = c.benchmark_group("sig/dstu-4145-m257");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(2);
    let scheme = Dstu4145::m257();
    let (private, public) = scheme.generate_keypair(&mut rng).unwrap();
    let message = vec![0u8; 1024];
    let signature = scheme.sign(&message, &private, &mut rng).unwrap();

    group.bench_function("sign", |bench| {
        bench.iter(|| scheme.sign(black_box(&message), &private, &mut rng).unwrap());
    });
    group.bench_function("verify", |bench| {
        bench.iter(|| scheme.verify(black_box(&message), &signature, &public));
    });

    group.finish();
}

fn bench_hybrid(c: &mut Criterion) {
    let mut group = c.benchmark_group("sig/hybrid");
    group.sample_size(10);

    let mut rng = StdRng::seed_from_u64(3);
    let scheme = HybridScheme::new();
    let keypair = scheme.generate_keypair(None, &mut rng).unwrap();
    let message = vec![0u8; 1024];
    let signature = scheme.sign(&message, &keypair, &mut rng).unwrap();

    group.bench_function("sign", |bench| {
        bench.iter(|| scheme.sign(black_box(&message), &keypair, &mut rng).unwrap());
    });
    group.bench_function("verify", |bench| {
        bench.iter(|| scheme.verify(black_box(&message), &signature, &keypair));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_kupyna,
    bench_field,
    bench_curve,
    bench_dstu,
    bench_hybrid
);
criterion_main!(benches);
