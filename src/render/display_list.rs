use crate::bounds::Vec2;
use crate::error::RenderError;
use crate::render::Canvas;

/// A drawing primitive in image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Star { at: Vec2, radius: u32 },
    Box { center: Vec2, side: f64 },
}

/// A [`Canvas`] that records primitives instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub primitives: Vec<Primitive>,
    pub finished: bool,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stars(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Star { at, .. } => Some(at),
            Primitive::Box { .. } => None,
        })
    }

    /// `(center, side)` of every box, in draw order.
    pub fn boxes(&self) -> impl Iterator<Item = (Vec2, f64)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Box { center, side } => Some((center, side)),
            Primitive::Star { .. } => None,
        })
    }
}

impl Canvas for DisplayList {
    fn draw_star(&mut self, at: Vec2, radius: u32) -> Result<(), RenderError> {
        self.primitives.push(Primitive::Star { at, radius });
        Ok(())
    }

    fn draw_box(&mut self, center: Vec2, side: f64) -> Result<(), RenderError> {
        self.primitives.push(Primitive::Box { center, side });
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.finished = true;
        Ok(())
    }
}
