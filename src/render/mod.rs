use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bounds::Vec2;
use crate::error::RenderError;
use crate::node::Node;

pub mod display_list;
pub mod plotters_canvas;

pub use display_list::{DisplayList, Primitive};
pub use plotters_canvas::PlottersCanvas;

/// Default simulation units per image unit.
pub const DEFAULT_SCALE: f64 = 2000.0;

/// Default star marker radius in pixels.
pub const DEFAULT_STAR_RADIUS: u32 = 1;

/// Trait for the drawing surfaces a tree is rendered onto.
///
/// Coordinates are in image space with the origin at the canvas center; the
/// surface applies its own translation when it is set up. Boxes are always
/// centered: a box with center `c` and side `s` spans `c - s/2 ..= c + s/2`.
pub trait Canvas {
    /// Draw a filled star marker centered on `at`.
    fn draw_star(&mut self, at: Vec2, radius: u32) -> Result<(), RenderError>;

    /// Draw an unfilled square outline.
    fn draw_box(&mut self, center: Vec2, side: f64) -> Result<(), RenderError>;

    /// Flush whatever the surface buffered.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Which layer ends up on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layering {
    /// Stars are drawn first, boxes over them.
    #[default]
    BoxesOverStars,
    StarsOverBoxes,
}

/// Counts of what a render emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub stars: usize,
    pub boxes: usize,
}

/// Maps a tree from simulation space into image space and draws it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderer {
    /// Simulation units per image unit, `k`.
    pub scale: f64,
    pub star_radius: u32,
    pub layering: Layering,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            star_radius: DEFAULT_STAR_RADIUS,
            layering: Layering::default(),
        }
    }
}

impl Renderer {
    pub fn new(scale: f64, star_radius: u32, layering: Layering) -> Self {
        Self {
            scale,
            star_radius,
            layering,
        }
    }

    pub fn to_image(&self, p: Vec2) -> Vec2 {
        p.scaled_down(self.scale)
    }

    /// Draws both passes in the configured layer order and finishes the canvas.
    pub fn render<C: Canvas>(&self, root: &Node, canvas: &mut C) -> Result<RenderStats, RenderError> {
        let mut stats = RenderStats::default();
        match self.layering {
            Layering::BoxesOverStars => {
                stats.stars = self.draw_stars(root, canvas)?;
                stats.boxes = self.draw_boxes(root, canvas)?;
            }
            Layering::StarsOverBoxes => {
                stats.boxes = self.draw_boxes(root, canvas)?;
                stats.stars = self.draw_stars(root, canvas)?;
            }
        }
        canvas.finish()?;
        Ok(stats)
    }

    /// Star pass: one marker per star, in [`Node::all_stars`] order.
    pub fn draw_stars<C: Canvas>(&self, root: &Node, canvas: &mut C) -> Result<usize, RenderError> {
        debug!("drawing the stars");
        let stars = root.all_stars();
        for star in &stars {
            canvas.draw_star(self.to_image(star.c), self.star_radius)?;
        }
        debug!(count = stars.len(), "done drawing the stars");
        Ok(stars.len())
    }

    /// Box pass: pre-order walk drawing every node that has a boundary.
    pub fn draw_boxes<C: Canvas>(&self, root: &Node, canvas: &mut C) -> Result<usize, RenderError> {
        debug!("drawing the boxes");
        let mut count = 0;
        self.draw_box(root, canvas, &mut count)?;
        debug!(count, "done drawing the boxes");
        Ok(count)
    }

    fn draw_box<C: Canvas>(&self, node: &Node, canvas: &mut C, count: &mut usize) -> Result<(), RenderError> {
        if let Some(boundary) = node.boundary {
            canvas.draw_box(self.to_image(boundary.center), boundary.width / self.scale)?;
            *count += 1;
        }
        for child in node.children() {
            self.draw_box(child, canvas, count)?;
        }
        Ok(())
    }
}

/// Rejects canvases that are empty or larger than `max_side` on a side.
pub fn check_canvas(side: u32, max_side: u32) -> Result<(), RenderError> {
    if side == 0 || side > max_side {
        return Err(RenderError::InvalidCanvas { side, max: max_side });
    }
    Ok(())
}

/// Renders `tree` onto a square SVG canvas and returns the document.
pub fn render_svg(renderer: &Renderer, tree: &Node, side: u32, max_side: u32) -> Result<String, RenderError> {
    check_canvas(side, max_side)?;
    let mut document = String::new();
    let stats = {
        let mut canvas = PlottersCanvas::svg(&mut document, side)?;
        renderer.render(tree, &mut canvas)?
    };
    info!(side, stars = stats.stars, boxes = stats.boxes, bytes = document.len(), "rendered svg");
    Ok(document)
}

/// Renders `tree` onto a square raster canvas and writes it to `path` as PNG.
pub fn render_png(
    renderer: &Renderer,
    tree: &Node,
    side: u32,
    max_side: u32,
    path: &Path,
) -> Result<RenderStats, RenderError> {
    check_canvas(side, max_side)?;
    let mut canvas = PlottersCanvas::png(path, side)?;
    let stats = renderer.render(tree, &mut canvas)?;
    info!(side, stars = stats.stars, boxes = stats.boxes, path = %path.display(), "rendered png");
    Ok(stats)
}
