use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galaxyview::batch::random_tree;
use galaxyview::source::{decode_tree, encode_tree};
use galaxyview::{BoundingBox, Node, Star2D, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_STARS: usize = 10_000;

fn benchmark_insert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let stars: Vec<Star2D> = (0..NUM_STARS)
        .map(|_| Star2D::at(rng.gen_range(-1.0e6..1.0e6), rng.gen_range(-1.0e6..1.0e6)))
        .collect();

    c.bench_function(&format!("insert_{}_stars", NUM_STARS), |b| {
        b.iter(|| {
            let mut root = Node::new(BoundingBox::new(Vec2::new(0.0, 0.0), 2.0e6));
            for star in &stars {
                root.insert(black_box(*star));
            }
            root
        })
    });
}

fn benchmark_all_stars(c: &mut Criterion) {
    let tree = random_tree(&mut StdRng::seed_from_u64(2), NUM_STARS, 1.0e6);

    c.bench_function(&format!("all_stars_{}_stars", NUM_STARS), |b| {
        b.iter(|| black_box(tree.all_stars()))
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let tree = random_tree(&mut StdRng::seed_from_u64(3), 1_000, 1.0e6);
    let json = encode_tree(&tree).expect("encode");

    c.bench_function("decode_1000_stars", |b| {
        b.iter(|| decode_tree(black_box(json.as_bytes())).expect("decode"))
    });
}

criterion_group!(benches, benchmark_insert, benchmark_all_stars, benchmark_decode);
criterion_main!(benches);
