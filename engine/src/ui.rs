//! Layout primitives for screen-space UI.
//!
//! Everything is in physical pixels with the origin at the top-left corner.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Centers a child of `size` inside this rect. Oversized children are
    /// clamped to fit.
    pub fn center(&self, size: Size) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        Self {
            x: self.x + (self.w - w) / 2,
            y: self.y + (self.h - h) / 2,
            w,
            h,
        }
    }

    /// Splits the rect into a row-major `cols` x `rows` grid with `gap` pixels
    /// between neighbouring cells.
    pub fn grid(&self, cols: u32, rows: u32, gap: u32) -> Vec<Rect> {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let cell_w = self.w.saturating_sub(gap.saturating_mul(cols - 1)) / cols;
        let cell_h = self.h.saturating_sub(gap.saturating_mul(rows - 1)) / rows;

        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Rect::new(
                    self.x + col * (cell_w + gap),
                    self.y + row * (cell_h + gap),
                    cell_w,
                    cell_h,
                ));
            }
        }
        cells
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub const fn square(side: u32) -> Self {
        Self { w: side, h: side }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_positions_child_in_parent() {
        let parent = Rect::from_size(100, 100);
        let child = parent.center(Size::new(20, 10));
        assert_eq!(child, Rect::new(40, 45, 20, 10));
    }

    #[test]
    fn center_clamps_oversized_child() {
        let parent = Rect::new(10, 10, 50, 40);
        let child = parent.center(Size::new(999, 20));
        assert_eq!(child, Rect::new(10, 20, 50, 20));
    }

    #[test]
    fn grid_splits_row_major_with_gaps() {
        let cells = Rect::new(0, 0, 210, 210).grid(2, 2, 10);
        assert_eq!(
            cells,
            vec![
                Rect::new(0, 0, 100, 100),
                Rect::new(110, 0, 100, 100),
                Rect::new(0, 110, 100, 100),
                Rect::new(110, 110, 100, 100),
            ]
        );
        assert!(!cells[0].contains(105, 50));
        assert!(cells[1].contains(110, 0));
    }
}
