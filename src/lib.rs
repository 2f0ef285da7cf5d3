//! # galaxyview
//!
//! `galaxyview` renders the quadtrees of a galaxy simulation as images. A tree
//! is a hierarchy of square cells, each holding up to four child cells and the
//! stars that live in it.
//!
//! ## Features
//!
//! - **Trees**: [`Node`] decodes the simulation's JSON dump, collects stars and builds trees by insertion.
//! - **Registry**: [`TreeRegistry`] keeps loaded trees addressable by their simulation index.
//! - **Rendering**: [`Renderer`] draws stars and cell outlines onto any [`Canvas`], with SVG and PNG canvases built in.
//! - **Front-ends**: an HTTP viewer ([`server`]) and a batch renderer ([`batch`]).
//!
//! ## Main Interface
//!
//! ```
//! use galaxyview::{BoundingBox, DisplayList, Node, Renderer, Star2D, Vec2};
//!
//! let mut tree = Node::new(BoundingBox::new(Vec2::new(0.0, 0.0), 100.0));
//! tree.insert(Star2D::at(10.0, 10.0));
//!
//! let mut canvas = DisplayList::new();
//! let stats = Renderer::default().render(&tree, &mut canvas).unwrap();
//! assert_eq!(stats.stars, 1);
//! ```

pub mod batch;
pub mod cli;
mod bounds;
pub mod config;
pub mod error;
pub mod exitcode;
mod node;
mod registry;
pub mod render;
pub mod server;
pub mod source;

pub use bounds::BoundingBox;
pub use bounds::Vec2;
pub use error::RegistryError;
pub use error::RenderError;
pub use error::SourceError;
pub use error::ViewerError;
pub use node::Node;
pub use node::Star2D;
pub use node::MAX_INSERT_DEPTH;
pub use node::PLACEHOLDER_WIDTH;
pub use node::SUBTREE_SLOTS;
pub use registry::InsertPolicy;
pub use registry::TreeRegistry;
pub use render::Canvas;
pub use render::DisplayList;
pub use render::Layering;
pub use render::Primitive;
pub use render::Renderer;
