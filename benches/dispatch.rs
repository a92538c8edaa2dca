use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tvariant::Variant;

type V = Variant![u64, String, Vec<u8>];

#[derive(Clone, PartialEq)]
enum Native {
    Number(u64),
    Text(String),
    Bytes(Vec<u8>),
}

fn samples() -> Vec<(&'static str, V, Native)> {
    vec![
        ("u64", V::new(42u64), Native::Number(42)),
        ("String", V::new(String::from("hello world")), Native::Text(String::from("hello world"))),
        ("Vec<u8>", V::new(vec![7u8; 64]), Native::Bytes(vec![7u8; 64])),
    ]
}

fn clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    for (name, variant, native) in samples() {
        group
            .bench_with_input(BenchmarkId::new("Variant", name), &variant, |b, v| {
                b.iter(|| black_box(v).clone())
            })
            .bench_with_input(BenchmarkId::new("enum", name), &native, |b, n| {
                b.iter(|| black_box(n).clone())
            });
    }
}

fn eq(c: &mut Criterion) {
    let mut group = c.benchmark_group("eq");

    for (name, variant, native) in samples() {
        let (variant2, native2) = (variant.clone(), native.clone());
        group
            .bench_function(BenchmarkId::new("Variant", name), |b| {
                b.iter(|| black_box(&variant) == black_box(&variant2))
            })
            .bench_function(BenchmarkId::new("enum", name), |b| {
                b.iter(|| black_box(&native) == black_box(&native2))
            });
    }
}

fn take_and_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("take_and_drop");

    for (name, variant, _) in samples() {
        group.bench_function(BenchmarkId::new("Variant", name), |b| {
            b.iter_batched(
                || variant.clone(),
                |mut v| drop(black_box(v.take())),
                criterion::BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, clone, eq, take_and_drop);
criterion_main!(benches);
