use crate::bounds::{BoundingBox, Vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of child slots per node.
pub const SUBTREE_SLOTS: usize = 4;

/// Deepest level [`Node::insert`] subdivides to, counted from the node the insertion started on.
pub const MAX_INSERT_DEPTH: usize = 64;

/// Width of the placeholder trees the registry pads with.
pub const PLACEHOLDER_WIDTH: f64 = 10.0;

/// One simulated body. Only the position `c` matters for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Star2D {
    #[serde(alias = "C")]
    pub c: Vec2,
    #[serde(default, alias = "V")]
    pub v: Vec2,
    #[serde(default, alias = "M")]
    pub m: f64,
}

impl Star2D {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            c: Vec2::new(x, y),
            ..Self::default()
        }
    }
}

/// A cell of the quadtree.
///
/// Each node owns its children outright. On the wire a node looks like
///
/// ```json
/// {"boundary": {"center": {"x": 0, "y": 0}, "width": 100},
///  "subtrees": [null, null, null, null],
///  "stars": [{"c": {"x": 50, "y": 50}}]}
/// ```
///
/// `"boundry"` is accepted in place of `"boundary"` for older producers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(
        alias = "boundry",
        default,
        serialize_with = "write_boundary",
        deserialize_with = "read_boundary"
    )]
    pub boundary: Option<BoundingBox>,
    #[serde(default, deserialize_with = "read_subtrees")]
    pub subtrees: [Option<Box<Node>>; SUBTREE_SLOTS],
    #[serde(default, deserialize_with = "read_stars")]
    pub stars: Vec<Star2D>,
}

impl Node {
    /// Creates a childless, starless node. A zero-value boundary means "no boundary".
    pub fn new(boundary: BoundingBox) -> Self {
        Self {
            boundary: (!boundary.is_empty()).then_some(boundary),
            ..Self::default()
        }
    }

    /// The filler tree used for registry slots nothing was loaded into.
    pub fn placeholder() -> Self {
        Self::new(BoundingBox::new(Vec2::new(0.0, 0.0), PLACEHOLDER_WIDTH))
    }

    pub fn is_leaf(&self) -> bool {
        self.subtrees.iter().all(Option::is_none)
    }

    /// Present children in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.subtrees.iter().flatten().map(|child| child.as_ref())
    }

    /// Every star in this subtree: the node's own stars first, then each
    /// present child's stars in slot order.
    pub fn all_stars(&self) -> Vec<Star2D> {
        let mut stars = Vec::with_capacity(self.stars.len());
        self.collect_stars(&mut stars);
        stars
    }

    fn collect_stars(&self, out: &mut Vec<Star2D>) {
        out.extend_from_slice(&self.stars);
        for child in self.children() {
            child.collect_stars(out);
        }
    }

    pub fn star_count(&self) -> usize {
        self.stars.len() + self.children().map(Node::star_count).sum::<usize>()
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    /// Number of levels, a lone root has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().map(Node::depth).max().unwrap_or(0)
    }

    /// Inserts a star, subdividing full leaves.
    ///
    /// Returns `false` if the node has no boundary or the star lies outside it.
    /// A leaf holds at most one star; coincident stars end up together once
    /// [`MAX_INSERT_DEPTH`] is reached.
    pub fn insert(&mut self, star: Star2D) -> bool {
        self.insert_at(star, 0)
    }

    fn insert_at(&mut self, star: Star2D, depth: usize) -> bool {
        let Some(boundary) = self.boundary else {
            return false;
        };
        if !boundary.contains(star.c) {
            return false;
        }

        if self.is_leaf() {
            if self.stars.is_empty() || depth >= MAX_INSERT_DEPTH {
                self.stars.push(star);
                return true;
            }
            self.subdivide(boundary, depth);
        }

        for child in self.subtrees.iter_mut().flatten() {
            if child.insert_at(star, depth + 1) {
                return true;
            }
        }

        // Children of a decoded tree need not cover the parent.
        self.stars.push(star);
        true
    }

    fn subdivide(&mut self, boundary: BoundingBox, depth: usize) {
        let quadrants = boundary.quadrants();
        for (slot, quadrant) in self.subtrees.iter_mut().zip(quadrants) {
            *slot = Some(Box::new(Node::new(quadrant)));
        }

        let stars = std::mem::take(&mut self.stars);
        for star in stars {
            let placed = self
                .subtrees
                .iter_mut()
                .flatten()
                .any(|child| child.insert_at(star, depth + 1));
            if !placed {
                self.stars.push(star);
            }
        }
    }
}

fn write_boundary<S: Serializer>(boundary: &Option<BoundingBox>, s: S) -> Result<S::Ok, S::Error> {
    boundary.unwrap_or_default().serialize(s)
}

fn read_boundary<'de, D: Deserializer<'de>>(d: D) -> Result<Option<BoundingBox>, D::Error> {
    let boundary = Option::<BoundingBox>::deserialize(d)?;
    Ok(boundary.filter(|b| !b.is_empty()))
}

fn read_subtrees<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<[Option<Box<Node>>; SUBTREE_SLOTS], D::Error> {
    let listed = Option::<Vec<Option<Box<Node>>>>::deserialize(d)?.unwrap_or_default();
    if listed.len() > SUBTREE_SLOTS {
        return Err(serde::de::Error::invalid_length(
            listed.len(),
            &"at most 4 subtrees",
        ));
    }
    let mut subtrees: [Option<Box<Node>>; SUBTREE_SLOTS] = Default::default();
    for (slot, child) in subtrees.iter_mut().zip(listed) {
        *slot = child;
    }
    Ok(subtrees)
}

fn read_stars<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Star2D>, D::Error> {
    Ok(Option::<Vec<Star2D>>::deserialize(d)?.unwrap_or_default())
}
