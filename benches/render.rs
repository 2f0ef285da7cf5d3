use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galaxyview::batch::random_tree;
use galaxyview::render::render_svg;
use galaxyview::{DisplayList, Renderer};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NUM_STARS: usize = 10_000;

fn benchmark_display_list(c: &mut Criterion) {
    let tree = random_tree(&mut StdRng::seed_from_u64(1), NUM_STARS, 1.0e6);
    let renderer = Renderer::default();

    c.bench_function(&format!("display_list_{}_stars", NUM_STARS), |b| {
        b.iter(|| {
            let mut canvas = DisplayList::new();
            renderer.render(black_box(&tree), &mut canvas).expect("render");
            canvas
        })
    });
}

fn benchmark_svg(c: &mut Criterion) {
    let tree = random_tree(&mut StdRng::seed_from_u64(2), 1_000, 1.0e6);
    let renderer = Renderer::default();

    c.bench_function("svg_1000_stars", |b| {
        b.iter(|| render_svg(&renderer, black_box(&tree), 1024, 1024).expect("render"))
    });
}

criterion_group!(benches, benchmark_display_list, benchmark_svg);
criterion_main!(benches);
