use crate::graphics::{Color, DEFAULT_TEXT_SCALE, Renderer2d, line_height, text_width};
use crate::ui::Rect;

/// Flat, back-to-front list of things to draw this frame.
///
/// Built fresh from game state every frame; used both for drawing and for
/// turning a mouse release into game actions.
#[derive(Debug, Clone)]
pub struct ViewTree<A> {
    pub nodes: Vec<ViewNode<A>>,
}

impl<A> Default for ViewTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ViewTree<A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ViewNode<A>) {
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone)]
pub enum ViewNode<A> {
    Region(RegionNode<A>),
    Button(ButtonNode<A>),
    Text(TextNode),
}

/// A solid clickable area with no label.
#[derive(Debug, Clone)]
pub struct RegionNode<A> {
    pub rect: Rect,
    pub color: Color,
    pub action: A,
}

#[derive(Debug, Clone)]
pub struct ButtonNode<A> {
    pub rect: Rect,
    pub label: String,
    pub action: A,
    pub fill: Color,
    pub text: Color,
}

#[derive(Debug, Clone)]
pub struct TextNode {
    pub pos: (u32, u32),
    pub text: String,
    pub color: Color,
    pub scale: u32,
}

/// Actions under a click at `(mx, my)`, topmost first.
pub fn hit_test_actions<A: Clone>(view: &ViewTree<A>, (mx, my): (u32, u32)) -> Vec<A> {
    view.nodes
        .iter()
        .rev()
        .filter_map(|node| match node {
            ViewNode::Region(region) if region.rect.contains(mx, my) => Some(region.action.clone()),
            ViewNode::Button(button) if button.rect.contains(mx, my) => Some(button.action.clone()),
            _ => None,
        })
        .collect()
}

pub fn draw_view<A>(view: &ViewTree<A>, gfx: &mut dyn Renderer2d) {
    for node in &view.nodes {
        match node {
            ViewNode::Region(region) => gfx.fill_rect(region.rect, region.color),
            ViewNode::Button(button) => {
                gfx.fill_rect(button.rect, button.fill);
                gfx.rect_outline(button.rect, button.text);

                let scale = DEFAULT_TEXT_SCALE;
                let w = text_width(&button.label, scale);
                let x = button.rect.x + button.rect.w.saturating_sub(w) / 2;
                let glyph_h = line_height(scale) - scale;
                let y = button.rect.y + button.rect.h.saturating_sub(glyph_h) / 2;
                gfx.draw_text_scaled(x, y, &button.label, button.text, scale);
            }
            ViewNode::Text(text) => {
                gfx.draw_text_scaled(text.pos.0, text.pos.1, &text.text, text.color, text.scale)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> ViewTree<u8> {
        let mut view = ViewTree::new();
        view.push(ViewNode::Region(RegionNode {
            rect: Rect::new(0, 0, 10, 10),
            color: [255, 0, 0, 255],
            action: 1,
        }));
        view.push(ViewNode::Button(ButtonNode {
            rect: Rect::new(5, 5, 10, 10),
            label: String::new(),
            action: 2,
            fill: [0, 0, 0, 255],
            text: [255, 255, 255, 255],
        }));
        view.push(ViewNode::Text(TextNode {
            pos: (20, 20),
            text: "X".to_string(),
            color: [255, 255, 255, 255],
            scale: 4,
        }));
        view
    }

    #[test]
    fn hit_test_reports_topmost_first() {
        let view = sample_view();
        assert_eq!(hit_test_actions(&view, (6, 6)), vec![2, 1]);
        assert_eq!(hit_test_actions(&view, (1, 1)), vec![1]);
        assert!(hit_test_actions(&view, (40, 40)).is_empty());
    }

    #[test]
    fn text_never_hits() {
        let view = sample_view();
        assert!(hit_test_actions(&view, (21, 21)).is_empty());
    }
}
