//! Benchmarks for the banner crop path.
//!
//! Run with: cargo bench -p bannerforge-core

use bannerforge_core::pipeline::{center_crop, decode_bytes, encode_jpeg, CropFrame};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

fn source_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
    .write_to(&mut buffer, ImageFormat::Png)
    .unwrap();
    buffer.into_inner()
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = source_png(1792, 1024);

    c.bench_function("decode_png_1792x1024", |b| {
        b.iter(|| {
            let _ = decode_bytes(black_box(&bytes), "bench://source.png");
        })
    });
}

fn benchmark_center_crop(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1792, 1024);

    c.bench_function("center_crop_banner", |b| {
        b.iter(|| {
            let _ = center_crop(black_box(&img), CropFrame::BANNER);
        })
    });
}

fn benchmark_undersized_crop(c: &mut Criterion) {
    let img = DynamicImage::new_rgba8(1024, 300);

    c.bench_function("center_crop_undersized_rgba", |b| {
        b.iter(|| {
            let _ = center_crop(black_box(&img), CropFrame::BANNER);
        })
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let canvas = RgbImage::new(1450, 450);

    c.bench_function("encode_jpeg_q92", |b| {
        b.iter(|| {
            let _ = encode_jpeg(black_box(&canvas), 92);
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_center_crop,
    benchmark_undersized_crop,
    benchmark_encode,
);
criterion_main!(benches);
