use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Horizontal distance between glyph origins at `scale`.
pub fn glyph_advance(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_height(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Width in pixels of the longest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.lines()
        .map(|line| line.chars().count() as u32 * glyph_advance(scale))
        .max()
        .unwrap_or(0)
}

/// 2D drawing interface used by all game-side rendering.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Software renderer writing into a borrowed RGBA8 frame.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Clips `rect` to the surface, returning `None` when nothing is visible or
    /// the frame is too small for the declared size.
    fn clip(&self, rect: Rect) -> Option<Rect> {
        if self.frame.len() < self.size.rgba_len() || self.size.is_empty() {
            return None;
        }
        let right = rect.right().min(self.size.width);
        let bottom = rect.bottom().min(self.size.height);
        if rect.x >= right || rect.y >= bottom {
            return None;
        }
        Some(Rect::new(rect.x, rect.y, right - rect.x, bottom - rect.y))
    }

    fn for_each_pixel(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        let Some(visible) = self.clip(rect) else {
            return;
        };
        let stride = self.size.width as usize * 4;
        for y in visible.y..visible.bottom() {
            let start = y as usize * stride + visible.x as usize * 4;
            let end = start + visible.w as usize * 4;
            for px in self.frame[start..end].chunks_exact_mut(4) {
                f(px);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_pixel(rect, |px| px.copy_from_slice(&color));
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(line_height(scale));
                continue;
            }
            if ch != ' ' {
                let bits = glyph_bits(ch);
                for row in 0..GLYPH_H {
                    for col in 0..GLYPH_W {
                        let bit = (GLYPH_H - 1 - row) * GLYPH_W + (GLYPH_W - 1 - col);
                        if bits & (1 << bit) == 0 {
                            continue;
                        }
                        let px = Rect::new(
                            cursor_x.saturating_add(col * scale),
                            cursor_y.saturating_add(row * scale),
                            scale,
                            scale,
                        );
                        self.fill_rect(px, color);
                    }
                }
            }
            cursor_x = cursor_x.saturating_add(glyph_advance(scale));
        }
    }
}

/// 3x5 block glyphs packed row-major, top row in the high bits.
fn glyph_bits(ch: char) -> u16 {
    match ch.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_111_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_001_001_001,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_010,
        'K' => 0b101_101_110_101_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_101_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_111_111_101,
        'X' => 0b101_101_010_101_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        '.' => 0b000_000_000_000_010,
        ',' => 0b000_000_000_010_100,
        ':' => 0b000_010_000_010_000,
        '-' => 0b000_000_111_000_000,
        '!' => 0b010_010_010_000_010,
        '\'' => 0b010_010_000_000_000,
        _ => 0b111_001_010_000_010,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn fill_rect_clips_to_surface() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(2, 2, 10, 10), [9, 8, 7, 255]);

        assert_eq!(pixel(&frame, 4, 3, 3), [9, 8, 7, 255]);
        assert_eq!(pixel(&frame, 4, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn undersized_frame_is_left_untouched() {
        let mut frame = vec![0u8; 8];
        let mut gfx = CpuRenderer::new(&mut frame, SurfaceSize::new(4, 4));
        gfx.clear([255, 255, 255, 255]);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn text_draws_glyph_pixels_at_scale() {
        let size = SurfaceSize::new(8, 10);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.draw_text_scaled(0, 0, "I", [255, 0, 0, 255], 2);

        // Top bar of 'I' spans the full glyph width.
        assert_eq!(pixel(&frame, 8, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 8, 5, 1), [255, 0, 0, 255]);
        // Second row only has the centre column lit.
        assert_eq!(pixel(&frame, 8, 0, 2), [0, 0, 0, 0]);
        assert_eq!(pixel(&frame, 8, 2, 2), [255, 0, 0, 255]);
    }

    #[test]
    fn text_width_uses_longest_line() {
        assert_eq!(text_width("AB\nABCD", 1), 16);
        assert_eq!(text_width("", 3), 0);
    }
}
