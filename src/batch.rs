//! Batch rendering: `{i}.json` in, `{i}.png` out, for every `i` in `0..amount`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;
use tracing::{error, info, instrument};

use crate::bounds::{BoundingBox, Vec2};
use crate::error::{ViewerError, ViewerResult};
use crate::node::{Node, Star2D};
use crate::registry::TreeRegistry;
use crate::render::{RenderStats, Renderer, render_png};
use crate::source::{read_tree_file, tree_path, write_tree_file};

/// Everything a batch run needs besides the registry.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub dir: PathBuf,
    pub renderer: Renderer,
    pub canvas_side: u32,
    pub max_canvas_side: u32,
}

/// Outcome of a batch run. A failing item does not stop the run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub rendered: Vec<(usize, RenderStats)>,
    pub failed: Vec<(usize, ViewerError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl BatchJob {
    pub fn run(&self, amount: usize, registry: &TreeRegistry) -> BatchReport {
        let started = Instant::now();
        let mut report = BatchReport::default();
        for index in 0..amount {
            match self.render_one(index, registry) {
                Ok(stats) => report.rendered.push((index, stats)),
                Err(e) => {
                    error!(index, error = %e, "skipping tree");
                    report.failed.push((index, e));
                }
            }
        }
        info!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch done"
        );
        report
    }

    #[instrument(skip(self, registry))]
    fn render_one(&self, index: usize, registry: &TreeRegistry) -> ViewerResult<RenderStats> {
        let tree = read_tree_file(&tree_path(&self.dir, index, "json"))?;
        registry.ensure_and_insert(index, tree)?;
        let tree = registry.get(index)?;
        let output = tree_path(&self.dir, index, "png");
        Ok(render_png(
            &self.renderer,
            &tree,
            self.canvas_side,
            self.max_canvas_side,
            &output,
        )?)
    }
}

/// Builds a quadtree of `stars` stars scattered uniformly over a disc.
pub fn random_tree<R: Rng>(rng: &mut R, stars: usize, radius: f64) -> Node {
    let mut root = Node::new(BoundingBox::new(Vec2::new(0.0, 0.0), radius * 2.0));
    for _ in 0..stars {
        let r = radius * rng.gen_range(0.0f64..1.0).sqrt();
        let phi = rng.gen_range(0.0..std::f64::consts::TAU);
        root.insert(Star2D::at(r * phi.cos(), r * phi.sin()));
    }
    root
}

/// Writes `amount` random trees as `{i}.json` batch inputs.
pub fn generate(dir: &Path, amount: usize, stars: usize, radius: f64) -> ViewerResult<()> {
    let mut rng = rand::thread_rng();
    for index in 0..amount {
        let tree = random_tree(&mut rng, stars, radius);
        write_tree_file(&tree_path(dir, index, "json"), &tree)?;
        info!(index, stars, nodes = tree.node_count(), "wrote tree");
    }
    Ok(())
}
