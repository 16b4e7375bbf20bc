use engine::graphics::{CpuRenderer, Renderer2d};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::ui::Rect;
use engine::view_tree::{ButtonNode, RegionNode, TextNode, ViewNode, ViewTree, draw_view};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn sample_view(button_fill: [u8; 4]) -> ViewTree<&'static str> {
    let mut view = ViewTree::new();
    view.push(ViewNode::Region(RegionNode {
        rect: Rect::new(10, 10, 40, 40),
        color: RED,
        action: "region",
    }));
    view.push(ViewNode::Button(ButtonNode {
        rect: Rect::new(60, 10, 80, 30),
        label: "GO".to_string(),
        action: "button",
        fill: button_fill,
        text: WHITE,
    }));
    view.push(ViewNode::Text(TextNode {
        pos: (10, 60),
        text: "HI".to_string(),
        color: WHITE,
        scale: 2,
    }));
    view
}

fn render(view: &ViewTree<&'static str>, size: SurfaceSize) -> RgbaBufferSurface {
    let mut surface = RgbaBufferSurface::new(size);
    let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
    gfx.clear(BLACK);
    draw_view(view, &mut gfx);
    surface
}

#[test]
fn draw_view_paints_regions_and_buttons() {
    let surface = render(&sample_view(BLUE), SurfaceSize::new(160, 100));

    assert_eq!(surface.pixel(0, 0), Some(BLACK));
    assert_eq!(surface.pixel(10, 10), Some(RED));
    assert_eq!(surface.pixel(49, 49), Some(RED));
    assert_eq!(surface.pixel(50, 50), Some(BLACK));

    // Outline in text color, fill inside.
    assert_eq!(surface.pixel(60, 10), Some(WHITE));
    assert_eq!(surface.pixel(62, 12), Some(BLUE));
}

#[test]
fn draw_view_clips_nodes_past_the_edge() {
    let mut view = ViewTree::new();
    view.push(ViewNode::Region(RegionNode {
        rect: Rect::new(20, 20, 100, 100),
        color: RED,
        action: "region",
    }));
    let surface = render(&view, SurfaceSize::new(32, 32));
    assert_eq!(surface.pixel(31, 31), Some(RED));
    assert_eq!(surface.pixel(32, 32), None);
    assert_eq!(surface.frame().len(), 32 * 32 * 4);
}

#[test]
fn frame_hash_is_stable_and_content_sensitive() {
    let size = SurfaceSize::new(160, 100);
    let first = render(&sample_view(BLUE), size).frame_hash();
    let again = render(&sample_view(BLUE), size).frame_hash();
    let other = render(&sample_view(RED), size).frame_hash();

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(first.len(), 64);
}

#[test]
fn frame_hash_covers_dimensions() {
    let empty = RgbaBufferSurface::new(SurfaceSize::new(4, 2)).frame_hash();
    let same_bytes = RgbaBufferSurface::new(SurfaceSize::new(2, 4)).frame_hash();
    assert_ne!(empty, same_bytes);
}
