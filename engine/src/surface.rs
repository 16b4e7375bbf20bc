use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// An in-memory RGBA surface for headless rendering and tests.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.buf.resize(size.rgba_len(), 0u8);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.buf.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Hex SHA-256 of the frame, prefixed by its dimensions so equal bytes at
    /// different sizes never collide.
    pub fn frame_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.size.width.to_le_bytes());
        hasher.update(self.size.height.to_le_bytes());
        hasher.update(&self.buf);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_hash_tracks_content_and_size() {
        let mut a = RgbaBufferSurface::new(SurfaceSize::new(2, 2));
        let b = RgbaBufferSurface::new(SurfaceSize::new(2, 2));
        assert_eq!(a.frame_hash(), b.frame_hash());
        assert_eq!(a.frame_hash().len(), 64);

        a.frame_mut()[0] = 1;
        assert_ne!(a.frame_hash(), b.frame_hash());

        let wide = RgbaBufferSurface::new(SurfaceSize::new(4, 1));
        let tall = RgbaBufferSurface::new(SurfaceSize::new(1, 4));
        assert_ne!(wide.frame_hash(), tall.frame_hash());
    }

    #[test]
    fn pixel_reads_are_bounds_checked() {
        let mut s = RgbaBufferSurface::new(SurfaceSize::new(2, 1));
        s.frame_mut()[4..8].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(s.pixel(1, 0), Some([1, 2, 3, 4]));
        assert_eq!(s.pixel(2, 0), None);

        s.resize(SurfaceSize::new(3, 3));
        assert_eq!(s.frame().len(), 36);
    }
}
