//! Benchmarks for atlas construction and text emission.

#[path = "../tests/common/mod.rs"]
mod common;

use common::SyntheticFace;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessera_test_utils::MockRenderContext;
use tessera_text::{AtlasBuilder, BitmapFont, FontLibrary, LibraryConfig, TextEmitter};

fn bench_atlas_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("atlas_build");

    for size in [8u32, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let face = SyntheticFace::new(size);
            let builder = AtlasBuilder::new(1);
            b.iter(|| black_box(builder.build(&face, 8192)));
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let ctx = MockRenderContext::new();
    let library = FontLibrary::new(LibraryConfig::default());
    let font = BitmapFont::from_face(&ctx, &library, &SyntheticFace::new(16), 0)
        .expect("Failed to build font");

    let mut group = c.benchmark_group("emit");
    let paragraph = "The quick brown fox jumps over the lazy dog.\n".repeat(20);

    group.throughput(Throughput::Bytes(paragraph.len() as u64));
    group.bench_function("paragraph", |b| {
        let mut emitter = TextEmitter::default();
        b.iter(|| {
            let summary = emitter.out_text_at(&font, 0.0, 480.0, black_box(&paragraph));
            emitter.clear();
            black_box(summary)
        });
    });

    group.bench_function("formatted", |b| {
        let mut emitter = TextEmitter::default();
        b.iter(|| {
            let summary = emitter.out_fmt_at(
                &font,
                0.0,
                480.0,
                format_args!("frame {} took {:.2} ms", black_box(1234), black_box(16.6)),
            );
            emitter.clear();
            black_box(summary)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_atlas_build, bench_emit);
criterion_main!(benches);
