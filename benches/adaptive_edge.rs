use adaptive_edge::{adaptive_edge_u8, EdgeWorkspace, PixelLayout, ThresholdParams};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;

fn test_frame(width: usize, height: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
        if c == 3 {
            255
        } else {
            ((x * 7 + y * 13 + c * 31) % 251) as u8
        }
    })
}

fn bench_adaptive_edge(c: &mut Criterion) {
    let frame = test_frame(1280, 1024);
    let params = ThresholdParams::automatic();

    c.bench_function("adaptive_edge_rgba_1280x1024", |b| {
        b.iter(|| {
            let out = adaptive_edge_u8(black_box(frame.view()), true, &params).expect("valid frame");
            black_box(out);
        });
    });
}

fn bench_workspace_reuse(c: &mut Criterion) {
    let frame = test_frame(1280, 1024);
    let params = ThresholdParams::manual(16);
    let mut workspace =
        EdgeWorkspace::new(1024, 1280, PixelLayout::new(4, true)).expect("valid layout");

    c.bench_function("adaptive_edge_workspace_rgba_1280x1024", |b| {
        b.iter(|| {
            let threshold = workspace.run(black_box(frame.view()), &params).expect("valid frame");
            black_box(threshold);
        });
    });
}

criterion_group!(benches, bench_adaptive_edge, bench_workspace_reuse);
criterion_main!(benches);
