use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mzbinary::codec::BinaryDataEncoder;
use mzbinary::config::{Compression, EncoderConfig, Numpress, Precision};

fn generate_mz(peaks: usize) -> Vec<f64> {
    (0..peaks)
        .map(|j| 100.0 + (j as f64) * 0.731 + ((j * 17) % 13) as f64 * 1e-4)
        .collect()
}

fn generate_intensity(peaks: usize) -> Vec<f64> {
    (0..peaks)
        .map(|j| 1000.0 + ((j * 7919) % 100_000) as f64 * 3.7)
        .collect()
}

fn configs() -> Vec<(&'static str, EncoderConfig)> {
    vec![
        ("f64", EncoderConfig::default()),
        (
            "f32_zlib",
            EncoderConfig::default()
                .with_precision(Precision::Float32)
                .with_compression(Compression::Zlib),
        ),
        (
            "linear_zlib",
            EncoderConfig::default()
                .with_numpress(Numpress::Linear)
                .with_compression(Compression::Zlib),
        ),
        (
            "slof",
            EncoderConfig::default()
                .with_numpress(Numpress::Slof)
                .with_error_tolerance(1e-3),
        ),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_encode");

    for peaks in [1_000, 10_000, 100_000] {
        let mz = generate_mz(peaks);
        let intensity = generate_intensity(peaks);
        group.throughput(Throughput::Elements(peaks as u64));

        for (name, config) in configs() {
            let values = if config.numpress == Numpress::Slof {
                &intensity
            } else {
                &mz
            };
            let encoder = BinaryDataEncoder::new(config).unwrap();
            group.bench_with_input(BenchmarkId::new(name, peaks), values, |b, values| {
                b.iter(|| black_box(encoder.encode(values).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_decode");

    for peaks in [1_000, 10_000, 100_000] {
        let mz = generate_mz(peaks);
        let intensity = generate_intensity(peaks);
        group.throughput(Throughput::Elements(peaks as u64));

        for (name, config) in configs() {
            let values = if config.numpress == Numpress::Slof {
                &intensity
            } else {
                &mz
            };
            let encoded = BinaryDataEncoder::new(config).unwrap().encode(values).unwrap();
            let decoder = BinaryDataEncoder::new(encoded.config.clone()).unwrap();
            group.bench_with_input(BenchmarkId::new(name, peaks), &encoded.text, |b, text| {
                b.iter(|| black_box(decoder.decode(text).unwrap()));
            });
        }
    }

    group.finish();
}

fn bench_wrapped_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_decode_wrapped_text");

    let peaks = 50_000;
    let config = EncoderConfig::default().with_compression(Compression::Zlib);
    let encoder = BinaryDataEncoder::new(config).unwrap();
    let encoded = encoder.encode(&generate_mz(peaks)).unwrap();
    let wrapped: String = encoded
        .text
        .as_bytes()
        .chunks(76)
        .map(|line| format!("{}\n", String::from_utf8_lossy(line)))
        .collect();

    group.throughput(Throughput::Bytes(wrapped.len() as u64));
    group.bench_function("zlib_f64", |b| {
        b.iter(|| black_box(encoder.decode(&wrapped).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_wrapped_text);
criterion_main!(benches);
