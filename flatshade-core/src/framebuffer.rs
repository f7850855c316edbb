/// Colour and depth storage for one rendered frame
///
/// Both grids are flat, row-major `Vec`s indexed `y * width + x`.
use crate::shading::Rgb;

pub struct FrameBuffer {
    width: usize,
    height: usize,
    background: Rgb,
    color: Vec<Rgb>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    /// A cleared buffer. Zero dimensions yield an empty buffer that ignores writes.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Callers taking sizes from
    /// user input go through [`RenderConfig::validate`](crate::RenderConfig::validate) first.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        let size = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("framebuffer size {width}x{height} overflows usize"));
        Self {
            width,
            height,
            background,
            color: vec![background; size],
            depth: vec![f32::NEG_INFINITY; size],
        }
    }

    /// Reset for a new frame: depth to negative infinity, colour to background
    pub fn clear(&mut self) {
        self.color.fill(self.background);
        self.depth.fill(f32::NEG_INFINITY);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn color(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write `color` at (x, y) if `depth` is strictly greater than the stored
    /// depth. Returns whether the pixel was written.
    #[inline]
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32, color: Rgb) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if depth > self.depth[idx] {
            self.depth[idx] = depth;
            self.color[idx] = color;
            true
        } else {
            false
        }
    }

    /// The colour grid, row-major
    pub fn pixels(&self) -> &[Rgb] {
        &self.color
    }

    /// The depth grid, row-major
    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    /// Colour rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks() panics on 0
        self.color.chunks(self.width.max(1))
    }

    /// Number of pixels covered by at least one triangle this frame
    pub fn covered_pixels(&self) -> usize {
        self.depth.iter().filter(|d| **d != f32::NEG_INFINITY).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_clear() {
        let bg = Rgb::new(10, 20, 30);
        let fb = FrameBuffer::new(4, 3, bg);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|&c| c == bg));
        assert!(fb.depths().iter().all(|&d| d == f32::NEG_INFINITY));
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn test_depth_test_is_strict() {
        let mut fb = FrameBuffer::new(2, 2, Rgb::BLACK);
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);

        assert!(fb.test_and_set(1, 0, 0.5, red));
        assert!(!fb.test_and_set(1, 0, 0.5, blue));
        assert!(!fb.test_and_set(1, 0, 0.1, blue));
        assert_eq!(fb.color(1, 0), Some(red));

        assert!(fb.test_and_set(1, 0, 0.9, blue));
        assert_eq!(fb.color(1, 0), Some(blue));
        assert_eq!(fb.depth(1, 0), Some(0.9));
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(2, 2, Rgb::BLACK);
        assert!(!fb.test_and_set(2, 0, 1.0, Rgb::new(1, 1, 1)));
        assert!(!fb.test_and_set(0, 2, 1.0, Rgb::new(1, 1, 1)));
        assert_eq!(fb.color(5, 5), None);
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn test_clear_resets_both_grids() {
        let mut fb = FrameBuffer::new(3, 3, Rgb::BLACK);
        fb.test_and_set(1, 1, 2.0, Rgb::new(9, 9, 9));
        fb.clear();
        assert_eq!(fb.color(1, 1), Some(Rgb::BLACK));
        assert_eq!(fb.depth(1, 1), Some(f32::NEG_INFINITY));
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut fb = FrameBuffer::new(3, 2, Rgb::BLACK);
        let white = Rgb::new(255, 255, 255);
        fb.test_and_set(2, 1, 0.0, white);
        let rows: Vec<&[Rgb]> = fb.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], white);
        assert_eq!(rows[0][2], Rgb::BLACK);
    }
}
