use criterion::{Criterion, criterion_group, criterion_main};
use riskview::chart::{RiskChart, project_points};
use riskview::core::{Padding, PlotArea, RiskPoint, Viewport};
use riskview::render::NullRenderer;
use std::hint::black_box;

fn history(len: usize) -> Vec<RiskPoint> {
    (0..len)
        .map(|i| {
            let score = (i as f64 * 7.3) % 120.0 - 10.0;
            if i % 5 == 0 {
                RiskPoint::new(format!("t{i}"), score.to_string().as_str())
            } else {
                RiskPoint::new(format!("t{i}"), score)
            }
        })
        .collect()
}

fn bench_project_points_10k(c: &mut Criterion) {
    let area = PlotArea::from_viewport(Viewport::new(1920, 1080), Padding::default());
    let points = history(10_000);

    c.bench_function("project_points_10k", |b| {
        b.iter(|| {
            let _ = project_points(black_box(&points), area);
        })
    });
}

fn bench_render_frame_10k(c: &mut Criterion) {
    let chart = RiskChart::default();
    let points = history(10_000);
    let mut renderer = NullRenderer::default();

    c.bench_function("render_frame_10k", |b| {
        b.iter(|| {
            chart
                .render(&mut renderer, black_box(&points), Viewport::new(1920, 1080))
                .expect("render");
        })
    });
}

criterion_group!(benches, bench_project_points_10k, bench_render_frame_10k);
criterion_main!(benches);
