use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::bounds::Vec2;
use crate::error::RenderError;
use crate::render::Canvas;

/// A [`Canvas`] on any plotters backend: black background, white stars and outlines.
///
/// Image coordinates are truncated to whole pixels, then shifted so image-space
/// `(0, 0)` sits at the middle of the canvas.
pub struct PlottersCanvas<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    origin: (i32, i32),
}

impl<'a> PlottersCanvas<SVGBackend<'a>> {
    /// A square SVG canvas writing its document into `buf`.
    pub fn svg(buf: &'a mut String, side: u32) -> Result<Self, RenderError> {
        Self::new(SVGBackend::with_string(buf, (side, side)))
    }
}

impl<'a> PlottersCanvas<BitMapBackend<'a>> {
    /// A square raster canvas saved to `path` on [`Canvas::finish`]; the format follows the extension.
    pub fn png(path: &'a Path, side: u32) -> Result<Self, RenderError> {
        Self::new(BitMapBackend::new(path, (side, side)))
    }
}

impl<DB: DrawingBackend> PlottersCanvas<DB> {
    pub fn new(backend: DB) -> Result<Self, RenderError> {
        let area = backend.into_drawing_area();
        area.fill(&BLACK).map_err(RenderError::backend)?;
        let (width, height) = area.dim_in_pixel();
        let origin = (half(width), half(height));
        Ok(Self { area, origin })
    }

    /// Pixel position of image-space `(0, 0)`.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    fn to_pixel(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x as i32).saturating_add(self.origin.0),
            (p.y as i32).saturating_add(self.origin.1),
        )
    }
}

fn half(extent: u32) -> i32 {
    i32::try_from(extent / 2).unwrap_or(i32::MAX)
}

impl<DB: DrawingBackend> Canvas for PlottersCanvas<DB> {
    fn draw_star(&mut self, at: Vec2, radius: u32) -> Result<(), RenderError> {
        let center = self.to_pixel(at);
        self.area
            .draw(&Circle::new(center, radius, WHITE.filled()))
            .map_err(RenderError::backend)
    }

    fn draw_box(&mut self, center: Vec2, side: f64) -> Result<(), RenderError> {
        let (cx, cy) = self.to_pixel(center);
        let side = side as i32;
        let (x0, y0) = (cx.saturating_sub(side / 2), cy.saturating_sub(side / 2));
        let corners = [(x0, y0), (x0.saturating_add(side), y0.saturating_add(side))];
        self.area
            .draw(&Rectangle::new(corners, WHITE.stroke_width(1)))
            .map_err(RenderError::backend)
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.area.present().map_err(RenderError::backend)
    }
}
