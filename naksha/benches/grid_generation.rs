//! Benchmark the pixel walk behind generate_data.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use naksha::{
    BrightnessGrid, FixedClock, GeneratorOptions, MapMetadata, OccupancyGridGenerator, Pose2D,
    WireFormat, YamlMapGenerator, classify, create_serializer,
};

/// Room-like map: dark border walls, bright floor, grey band of unknown.
fn room_map(size: u32) -> BrightnessGrid {
    let mut values = Vec::with_capacity((size * size) as usize);
    for row in 0..size {
        for col in 0..size {
            let border = row < 2 || col < 2 || row >= size - 2 || col >= size - 2;
            let value = if border {
                0.0
            } else if row > size * 3 / 4 {
                0.5
            } else {
                1.0
            };
            values.push(value);
        }
    }
    BrightnessGrid::new(size, size, values).expect("square grid")
}

fn metadata() -> MapMetadata {
    MapMetadata {
        image: None,
        resolution: 0.05,
        origin: Pose2D::new(-10.0, -10.0, 0.0),
        free_thresh: 0.196,
        occupied_thresh: 0.65,
    }
}

fn bench_generate_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_data");

    for size in [128u32, 512, 2048] {
        let generator = YamlMapGenerator::from_parts(
            metadata(),
            room_map(size),
            GeneratorOptions::default().with_clock(FixedClock::from_millis(0)),
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, g| {
            b.iter(|| black_box(g.generate_data().unwrap()))
        });
    }

    group.finish();
}

fn bench_classify_only(c: &mut Criterion) {
    let raster = room_map(512);
    let thresholds = metadata().thresholds();

    c.bench_function("classify_512", |b| {
        b.iter(|| black_box(classify(black_box(&raster), thresholds).unwrap()))
    });
}

fn bench_serialize_grid(c: &mut Criterion) {
    let generator = YamlMapGenerator::from_parts(
        metadata(),
        room_map(1024),
        GeneratorOptions::default().with_clock(FixedClock::from_millis(0)),
    );
    let grid = generator.build_grid().unwrap();

    let mut group = c.benchmark_group("serialize_1024");
    for format in [WireFormat::Postcard, WireFormat::Json] {
        let serializer = create_serializer(format);
        group.bench_with_input(BenchmarkId::from_parameter(format), &grid, |b, grid| {
            b.iter(|| black_box(serializer.serialize(grid).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_data,
    bench_classify_only,
    bench_serialize_grid
);
criterion_main!(benches);
