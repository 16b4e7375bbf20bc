//! The on-screen board: four tiles, status lines and the start/restart button.

use std::time::Duration;

use engine::graphics::{Color, text_width};
use engine::surface::SurfaceSize;
use engine::ui::{Rect, Size};
use engine::view_tree::{ButtonNode, RegionNode, TextNode, ViewNode, ViewTree};

use crate::color::TileColor;
use crate::controller::{Effect, GameController, HIGHLIGHT_DURATION, Phase};

pub const COLOR_BACKGROUND: Color = [0, 0, 0, 255];
const COLOR_TEXT: Color = [255, 255, 255, 255];
const COLOR_START_BUTTON: Color = [34, 160, 70, 255];
const COLOR_RESTART_BUTTON: Color = [200, 40, 40, 255];

const TITLE: &str = "Simon Memory Game";
const TITLE_SCALE: u32 = 4;
const MESSAGE_SCALE: u32 = 3;
const LEVEL_SCALE: u32 = 2;
const TILE_GAP: u32 = 16;
const MARGIN: u32 = 24;
const HEADER_H: u32 = 120;
const FOOTER_H: u32 = 80;
const BUTTON_SIZE: Size = Size::new(240, 48);

/// The two inputs the board can send to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Tile(TileColor),
    StartOrRestart,
}

/// Screen element backing one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHandle {
    pub rect: Rect,
    pub base: Color,
    pub lit: Color,
}

/// Explicit color -> tile element mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    tiles: [TileHandle; 4],
}

impl TileMap {
    /// Lays the tiles out as a 2x2 grid filling `area`, in `TileColor::ALL` order.
    pub fn layout(area: Rect, gap: u32) -> Self {
        let cells = area.grid(2, 2, gap);
        let tiles = TileColor::ALL.map(|color| TileHandle {
            rect: cells[color.index()],
            base: base_color(color),
            lit: lit_color(color),
        });
        Self { tiles }
    }

    pub fn handle(&self, color: TileColor) -> &TileHandle {
        &self.tiles[color.index()]
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<TileColor> {
        TileColor::ALL
            .into_iter()
            .find(|&c| self.handle(c).rect.contains(x, y))
    }
}

fn base_color(color: TileColor) -> Color {
    match color {
        TileColor::Green => [0, 128, 0, 255],
        TileColor::Red => [160, 0, 0, 255],
        TileColor::Yellow => [170, 150, 0, 255],
        TileColor::Blue => [0, 0, 170, 255],
    }
}

fn lit_color(color: TileColor) -> Color {
    match color {
        TileColor::Green => [90, 255, 90, 255],
        TileColor::Red => [255, 90, 90, 255],
        TileColor::Yellow => [255, 255, 110, 255],
        TileColor::Blue => [110, 140, 255, 255],
    }
}

/// Per-tile highlight timers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlights {
    remaining: [Duration; 4],
}

impl Highlights {
    /// Lights `color` for `HIGHLIGHT_DURATION`, restarting any running timer.
    pub fn highlight(&mut self, color: TileColor) {
        self.remaining[color.index()] = HIGHLIGHT_DURATION;
    }

    pub fn is_lit(&self, color: TileColor) -> bool {
        !self.remaining[color.index()].is_zero()
    }

    pub fn tick(&mut self, dt: Duration) {
        for left in &mut self.remaining {
            *left = left.saturating_sub(dt);
        }
    }

    pub fn clear(&mut self) {
        self.remaining = [Duration::ZERO; 4];
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    size: SurfaceSize,
    tiles: TileMap,
    button: Rect,
    highlights: Highlights,
}

impl Board {
    pub fn new(size: SurfaceSize) -> Self {
        let (tiles, button) = layout(size);
        Self {
            size,
            tiles,
            button,
            highlights: Highlights::default(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        let (tiles, button) = layout(size);
        self.size = size;
        self.tiles = tiles;
        self.button = button;
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn button_rect(&self) -> Rect {
        self.button
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Applies the visual half of controller effects; tones are left to the caller.
    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            if let Effect::Highlight(color) = *effect {
                self.highlights.highlight(color);
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.highlights.tick(dt);
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    pub fn build_view(&self, game: &GameController) -> ViewTree<BoardAction> {
        let mut view = ViewTree::new();
        let width = self.size.width;

        view.push(centered_text(TITLE, width, MARGIN, TITLE_SCALE));
        view.push(centered_text(game.message(), width, MARGIN + 40, MESSAGE_SCALE));
        view.push(centered_text(
            &format!("Level: {}", game.level()),
            width,
            MARGIN + 72,
            LEVEL_SCALE,
        ));

        for color in TileColor::ALL {
            let handle = self.tiles.handle(color);
            let fill = if self.highlights.is_lit(color) {
                handle.lit
            } else {
                handle.base
            };
            view.push(ViewNode::Region(RegionNode {
                rect: handle.rect,
                color: fill,
                action: BoardAction::Tile(color),
            }));
        }

        let fill = if game.phase() == Phase::GameOver {
            COLOR_RESTART_BUTTON
        } else {
            COLOR_START_BUTTON
        };
        view.push(ViewNode::Button(ButtonNode {
            rect: self.button,
            label: game.action_label().to_string(),
            action: BoardAction::StartOrRestart,
            fill,
            text: COLOR_TEXT,
        }));

        view
    }
}

fn centered_text(text: &str, width: u32, y: u32, scale: u32) -> ViewNode<BoardAction> {
    let x = width.saturating_sub(text_width(text, scale)) / 2;
    ViewNode::Text(TextNode {
        pos: (x, y),
        text: text.to_string(),
        color: COLOR_TEXT,
        scale,
    })
}

fn layout(size: SurfaceSize) -> (TileMap, Rect) {
    let play = Rect::new(
        0,
        HEADER_H,
        size.width,
        size.height.saturating_sub(HEADER_H + FOOTER_H),
    );
    let side = play.w.min(play.h).saturating_sub(MARGIN * 2);
    let square = play.center(Size::square(side));
    let tiles = TileMap::layout(square, TILE_GAP);

    let footer = Rect::new(0, size.height.saturating_sub(FOOTER_H), size.width, FOOTER_H);
    let button = footer.center(BUTTON_SIZE);
    (tiles, button)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_expires_after_duration() {
        let mut h = Highlights::default();
        h.highlight(TileColor::Red);
        assert!(h.is_lit(TileColor::Red));
        assert!(!h.is_lit(TileColor::Blue));

        h.tick(HIGHLIGHT_DURATION - Duration::from_millis(1));
        assert!(h.is_lit(TileColor::Red));
        h.tick(Duration::from_millis(1));
        assert!(!h.is_lit(TileColor::Red));
    }

    #[test]
    fn rehighlight_restarts_timer() {
        let mut h = Highlights::default();
        h.highlight(TileColor::Green);
        h.tick(Duration::from_millis(200));
        h.highlight(TileColor::Green);
        h.tick(Duration::from_millis(200));
        assert!(h.is_lit(TileColor::Green));
    }

    #[test]
    fn tile_map_hits_each_quadrant() {
        let map = TileMap::layout(Rect::new(0, 0, 210, 210), 10);
        assert_eq!(map.tile_at(5, 5), Some(TileColor::Green));
        assert_eq!(map.tile_at(200, 5), Some(TileColor::Red));
        assert_eq!(map.tile_at(5, 200), Some(TileColor::Yellow));
        assert_eq!(map.tile_at(200, 200), Some(TileColor::Blue));
        assert_eq!(map.tile_at(105, 105), None);
    }
}
