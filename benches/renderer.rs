use chordwheel::config::{Config, LayoutConfig};
use chordwheel::ir::{ChordData, WeightMatrix};
use chordwheel::layout::compute_chord_layout;
use chordwheel::parser::parse_input;
use chordwheel::render::render_svg;
use chordwheel::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn dense_matrix(size: usize) -> Vec<Vec<f64>> {
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| {
                    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
                    ((lo * 7 + hi * 13) % 11) as f64
                })
                .collect()
        })
        .collect()
}

fn dense_data(size: usize) -> ChordData {
    let labels = (0..size).map(|i| format!("E{i}")).collect();
    let matrix = WeightMatrix::from_rows(&dense_matrix(size)).expect("matrix");
    ChordData::new(labels, matrix).expect("data")
}

fn samples_source(samples: usize, tags: usize) -> String {
    let mut out = String::from("{ samples: [\n");
    for s in 0..samples {
        let picked: Vec<String> = (0..tags)
            .filter(|t| (s * 31 + t * 17) % 5 < 2)
            .map(|t| format!("'t{t}'"))
            .collect();
        out.push_str(&format!("  [{}],\n", picked.join(", ")));
    }
    out.push_str("] }\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (samples, tags) in [(50, 8), (500, 20), (2000, 40)] {
        let input = samples_source(samples, tags);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{samples}x{tags}")),
            &input,
            |b, data| {
                b.iter(|| {
                    let parsed = parse_input(black_box(data)).expect("parse failed");
                    black_box(parsed.data.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::plotly();
    let config = LayoutConfig::default();
    for size in [5usize, 20, 60] {
        let data = dense_data(size);
        let colors = theme.entity_colors(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let layout = compute_chord_layout(black_box(data), &colors, &theme, &config)
                    .expect("layout failed");
                black_box(layout.shapes.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = Config::default();
    for size in [5usize, 20, 60] {
        let data = dense_data(size);
        let colors = config.theme.entity_colors(size);
        let layout = compute_chord_layout(&data, &colors, &config.theme, &config.layout)
            .expect("layout failed");
        group.bench_with_input(BenchmarkId::from_parameter(size), &layout, |b, layout| {
            b.iter(|| {
                let svg = render_svg(black_box(layout), &config.theme, &config.render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_render);
criterion_main!(benches);
