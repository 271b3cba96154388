use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use fb64::base64;

fn make_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn size_label(size: usize) -> String {
    if size >= 1024 * 1024 {
        format!("{}MB", size / (1024 * 1024))
    } else {
        format!("{}KB", size / 1024)
    }
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64_encode");
    for size in [1024, 64 * 1024, 1024 * 1024] {
        let data = make_test_data(size);
        let mut dest = vec![0u8; base64::encoded_len(size)];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("slice", size_label(size)), &data, |b, data| {
            b.iter(|| base64::encode(black_box(&mut dest), black_box(data)))
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64_validate");
    for size in [1024, 64 * 1024, 1024 * 1024] {
        let text = base64::encode_to_vec(&make_test_data(size));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("scan", size_label(size)), &text, |b, text| {
            b.iter(|| base64::validate(black_box(text)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("base64_decode");
    for size in [1024, 64 * 1024, 1024 * 1024] {
        let text = base64::encode_to_vec(&make_test_data(size));
        let mut dest = vec![0u8; size];
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("slice", size_label(size)), &text, |b, text| {
            b.iter(|| base64::decode(black_box(&mut dest), black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_validate, bench_decode);
criterion_main!(benches);
