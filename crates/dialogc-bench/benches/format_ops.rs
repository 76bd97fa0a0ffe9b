//! Criterion benchmarks for writing and parsing the exchange format.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use dialogc::Compiler;
use dialogc_bench::{reference_profile, stress_profile};
use dialogc_format::{PomdpDocument, PomdpWriter};

fn bench_write_reference(c: &mut Criterion) {
    let model = reference_profile().compile(&Compiler::default(), 5);
    let mut buf = Vec::with_capacity(1 << 20);
    c.bench_function("write_reference", |b| {
        b.iter(|| {
            buf.clear();
            let summary = PomdpWriter::new(&mut buf).write_model(&model).unwrap();
            black_box(summary);
        });
    });
}

fn bench_write_stress(c: &mut Criterion) {
    let model = stress_profile().compile(&Compiler::default(), 6);
    let mut buf = Vec::new();
    PomdpWriter::new(&mut buf).write_model(&model).unwrap();

    let mut group = c.benchmark_group("write_stress");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(buf.len() as u64));
    group.bench_function("vec", |b| {
        b.iter(|| {
            buf.clear();
            PomdpWriter::new(&mut buf).write_model(&model).unwrap();
            black_box(buf.len());
        });
    });
    group.finish();
}

fn bench_parse_reference(c: &mut Criterion) {
    let model = reference_profile().compile(&Compiler::default(), 7);
    let mut buf = Vec::new();
    PomdpWriter::new(&mut buf).write_model(&model).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut group = c.benchmark_group("parse_reference");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("str", |b| {
        b.iter(|| black_box(PomdpDocument::parse(black_box(&text)).unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_write_reference,
    bench_write_stress,
    bench_parse_reference
);
criterion_main!(benches);
