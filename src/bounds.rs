use serde::{Deserialize, Serialize};

/// A point in simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Divides both coordinates by `k`.
    pub fn scaled_down(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k)
    }
}

/// Square region described by its center and its side length.
///
/// The zero value (center at the origin, width zero) is the "unset" sentinel
/// producers send for cells that carry no geometry. Use [`BoundingBox::is_empty`]
/// to test for it; `Node` turns it into `None` when decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center: Vec2,
    pub width: f64,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        center: Vec2::new(0.0, 0.0),
        width: 0.0,
    };

    pub const fn new(center: Vec2, width: f64) -> Self {
        Self { center, width }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Closed containment test, edges included on all four sides.
    pub fn contains(&self, point: Vec2) -> bool {
        let h = self.half_width();
        point.x >= self.center.x - h
            && point.x <= self.center.x + h
            && point.y >= self.center.y - h
            && point.y <= self.center.y + h
    }

    /// The four quadrants of this box in subtree slot order: NW, NE, SW, SE.
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        let q = self.width / 4.0;
        let w = self.half_width();
        let c = self.center;
        [
            BoundingBox::new(Vec2::new(c.x - q, c.y + q), w),
            BoundingBox::new(Vec2::new(c.x + q, c.y + q), w),
            BoundingBox::new(Vec2::new(c.x - q, c.y - q), w),
            BoundingBox::new(Vec2::new(c.x + q, c.y - q), w),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_value_is_the_empty_sentinel() {
        assert!(BoundingBox::default().is_empty());
        assert_eq!(BoundingBox::default(), BoundingBox::EMPTY);
        assert!(!BoundingBox::new(Vec2::new(0.0, 0.0), 10.0).is_empty());
        assert!(!BoundingBox::new(Vec2::new(1.0, 0.0), 0.0).is_empty());
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let b = BoundingBox::new(Vec2::new(10.0, -10.0), 8.0);
        let q = b.quadrants();
        assert_eq!(q[0], BoundingBox::new(Vec2::new(8.0, -8.0), 4.0));
        assert_eq!(q[3], BoundingBox::new(Vec2::new(12.0, -12.0), 4.0));
        for child in q {
            assert!(b.contains(child.center));
        }
    }

    #[test]
    fn contains_includes_edges() {
        let b = BoundingBox::new(Vec2::new(0.0, 0.0), 2.0);
        assert!(b.contains(Vec2::new(1.0, -1.0)));
        assert!(!b.contains(Vec2::new(1.0001, 0.0)));
    }
}
