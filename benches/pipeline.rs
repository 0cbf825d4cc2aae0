//! Benchmarks for the sampling pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};

use pipette::{Colour, CoordinateMapper, FitMargins, ImagePicker, Magnifier, PixelBuffer, Point, Size};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

// -- Conversion benchmarks --

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    let colours: Vec<Colour> = (0..=255u8).map(|v| Colour::rgb(v, 255 - v, v / 2)).collect();

    group.bench_function("to_hex", |b| {
        b.iter(|| {
            for colour in &colours {
                black_box(colour.to_hex());
            }
        })
    });

    group.bench_function("to_hsl", |b| {
        b.iter(|| {
            for colour in &colours {
                black_box(colour.to_hsl());
            }
        })
    });

    group.finish();
}

// -- Mapping and readback benchmarks --

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    let buffer = PixelBuffer::from_image(gradient(1920, 1080)).unwrap();
    let mapper = CoordinateMapper::new(Size::new(1280, 720), buffer.size()).unwrap();

    group.bench_function("map_and_read", |b| {
        b.iter(|| {
            let pos = mapper.map(black_box(Point::new(640.3, 360.7)));
            buffer.read_pixel(pos).unwrap()
        })
    });

    let image = DynamicImage::ImageRgba8(gradient(64, 64));
    group.bench_function("fit_image", |b| {
        b.iter(|| {
            ImagePicker::from_image(black_box(&image), Size::new(1280, 800), FitMargins::default())
                .unwrap()
        })
    });

    group.finish();
}

// -- Magnifier benchmarks --

fn bench_magnifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("magnifier");

    let buffer = PixelBuffer::from_image(gradient(1920, 1080)).unwrap();
    let magnifier = Magnifier::default();

    group.bench_function("render_centre", |b| {
        b.iter(|| magnifier.render(&buffer, black_box(Point::new(960.0, 540.0))).unwrap())
    });

    group.bench_function("render_corner", |b| {
        b.iter(|| magnifier.render(&buffer, black_box(Point::new(1919.0, 0.0))).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_conversion, bench_sampling, bench_magnifier);
criterion_main!(benches);
