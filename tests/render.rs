use galaxyview::render::{PlottersCanvas, check_canvas, render_png, render_svg};
use galaxyview::source::decode_tree;
use galaxyview::{
    BoundingBox, Canvas, DisplayList, Layering, Node, Primitive, RenderError, Renderer, Star2D,
    Vec2,
};

const SINGLE_STAR: &str = r#"{"boundary":{"center":{"x":0,"y":0},"width":100},"subtrees":[null,null,null,null],"stars":[{"c":{"x":50,"y":50}}]}"#;

#[test]
fn test_single_star_scene() {
    let tree = decode_tree(SINGLE_STAR.as_bytes()).expect("valid tree");
    for k in [1.0, 2.0, 2000.0] {
        let renderer = Renderer::new(k, 1, Layering::BoxesOverStars);
        let mut canvas = DisplayList::new();
        let stats = renderer.render(&tree, &mut canvas).expect("render");

        assert_eq!(stats.stars, 1);
        assert_eq!(stats.boxes, 1);
        assert_eq!(
            canvas.stars().collect::<Vec<_>>(),
            vec![Vec2::new(50.0 / k, 50.0 / k)]
        );
        assert_eq!(
            canvas.boxes().collect::<Vec<_>>(),
            vec![(Vec2::new(0.0, 0.0), 100.0 / k)]
        );
        assert!(canvas.finished, "render must finish the canvas");
    }
}

#[test]
fn test_unset_boundary_is_skipped_but_children_are_walked() {
    let mut root = Node::new(BoundingBox::default());
    let mut child = Node::new(BoundingBox::default());
    child.subtrees[3] = Some(Box::new(Node::new(BoundingBox::new(Vec2::new(4.0, -4.0), 8.0))));
    root.subtrees[1] = Some(Box::new(child));
    root.subtrees[2] = Some(Box::new(Node::new(BoundingBox::new(Vec2::new(-2.0, 2.0), 2.0))));

    let mut canvas = DisplayList::new();
    let count = Renderer::new(2.0, 1, Layering::default())
        .draw_boxes(&root, &mut canvas)
        .expect("render");

    assert_eq!(count, 2);
    // Pre-order: slot 1's grandchild comes before slot 2.
    assert_eq!(
        canvas.boxes().collect::<Vec<_>>(),
        vec![(Vec2::new(2.0, -2.0), 4.0), (Vec2::new(-1.0, 1.0), 1.0)]
    );
}

#[test]
fn test_layering_controls_draw_order() {
    let mut tree = Node::new(BoundingBox::new(Vec2::new(0.0, 0.0), 100.0));
    tree.insert(Star2D::at(10.0, 10.0));

    let mut canvas = DisplayList::new();
    Renderer::new(1.0, 2, Layering::BoxesOverStars)
        .render(&tree, &mut canvas)
        .expect("render");
    assert!(matches!(canvas.primitives.first(), Some(Primitive::Star { radius: 2, .. })));
    assert!(matches!(canvas.primitives.last(), Some(Primitive::Box { .. })));

    let mut canvas = DisplayList::new();
    Renderer::new(1.0, 2, Layering::StarsOverBoxes)
        .render(&tree, &mut canvas)
        .expect("render");
    assert!(matches!(canvas.primitives.first(), Some(Primitive::Box { .. })));
    assert!(matches!(canvas.primitives.last(), Some(Primitive::Star { .. })));
}

#[test]
fn test_negative_width_is_drawn_as_given() {
    let tree = Node::new(BoundingBox::new(Vec2::new(0.0, 0.0), -10.0));
    let mut canvas = DisplayList::new();
    Renderer::new(1.0, 1, Layering::default())
        .render(&tree, &mut canvas)
        .expect("render");
    assert_eq!(canvas.boxes().collect::<Vec<_>>(), vec![(Vec2::new(0.0, 0.0), -10.0)]);
}

#[test]
fn test_svg_document() {
    let tree = decode_tree(SINGLE_STAR.as_bytes()).expect("valid tree");
    let svg = render_svg(&Renderer::new(1.0, 1, Layering::default()), &tree, 400, 1000).expect("render");

    assert!(svg.contains("<svg"), "not an svg document: {svg}");
    assert_eq!(svg.matches("<circle").count(), 1);
    // Background plus the root cell.
    assert_eq!(svg.matches("<rect").count(), 2);
}

#[test]
fn test_plotters_canvas_origin_is_centered() {
    let mut buf = String::new();
    let canvas = PlottersCanvas::svg(&mut buf, 300).expect("canvas");
    assert_eq!(canvas.origin(), (150, 150));
}

#[test]
fn test_png_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("0.png");
    let tree = decode_tree(SINGLE_STAR.as_bytes()).expect("valid tree");

    let stats = render_png(&Renderer::new(1.0, 1, Layering::default()), &tree, 128, 1000, &path).expect("render");
    assert_eq!((stats.stars, stats.boxes), (1, 1));

    let bytes = std::fs::read(&path).expect("png written");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_canvas_bounds() {
    assert!(check_canvas(15360, 32768).is_ok());
    assert!(matches!(
        check_canvas(0, 32768),
        Err(RenderError::InvalidCanvas { side: 0, .. })
    ));
    assert!(matches!(
        render_svg(&Renderer::default(), &Node::default(), 40000, 32768),
        Err(RenderError::InvalidCanvas { side: 40000, max: 32768 })
    ));
}

struct FailingCanvas;

impl Canvas for FailingCanvas {
    fn draw_star(&mut self, _at: Vec2, _radius: u32) -> Result<(), RenderError> {
        Err(RenderError::Backend("disk full".into()))
    }

    fn draw_box(&mut self, _center: Vec2, _side: f64) -> Result<(), RenderError> {
        Ok(())
    }
}

#[test]
fn test_canvas_failure_propagates() {
    let tree = decode_tree(SINGLE_STAR.as_bytes()).expect("valid tree");
    let err = Renderer::default()
        .render(&tree, &mut FailingCanvas)
        .expect_err("canvas fails");
    assert!(err.to_string().contains("disk full"));
}
