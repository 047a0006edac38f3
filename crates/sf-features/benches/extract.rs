use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sf_core::Image;
use sf_features::{FeatureConfig, FeatureExtractor};
use sf_filter::{FilterBank, GaborParams};

fn test_rgb(width: usize, height: usize) -> Image<[f32; 3]> {
    Image::from_fn(width, height, |x, y| {
        [
            ((x * 31 + y * 17) % 251) as f32 / 250.0,
            ((x * 7 + y * 3) % 97) as f32 / 96.0,
            ((x / 16 + y / 16) % 2) as f32,
        ]
    })
}

fn bench_filter_bank(c: &mut Criterion) {
    c.bench_function("gabor_bank_4_angles", |b| {
        b.iter(|| {
            let bank = FilterBank::new(GaborParams::default(), black_box(&[0.0, 45.0, 90.0, 135.0]))
                .expect("valid params");
            black_box(bank);
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let extractor = FeatureExtractor::new(FeatureConfig::default()).expect("valid config");

    for &(w, h) in &[(320usize, 240usize), (640, 480)] {
        let img = test_rgb(w, h);
        let view = img.as_view();
        c.bench_function(&format!("extract_default_{w}x{h}"), |b| {
            b.iter(|| {
                let maps = extractor.extract(black_box(&view)).expect("valid image");
                black_box(maps);
            });
        });
    }
}

fn bench_extract_intensity_only(c: &mut Criterion) {
    let cfg = FeatureConfig {
        channels: "I".parse().expect("valid channels"),
        ..FeatureConfig::default()
    };
    let extractor = FeatureExtractor::new(cfg).expect("valid config");
    let img = test_rgb(640, 480);
    let view = img.as_view();

    c.bench_function("extract_intensity_only_640x480", |b| {
        b.iter(|| {
            let maps = extractor.extract(black_box(&view)).expect("valid image");
            black_box(maps);
        });
    });
}

criterion_group!(
    benches,
    bench_filter_bank,
    bench_extract,
    bench_extract_intensity_only
);
criterion_main!(benches);
