/// Orthographic projection from world space to framebuffer coordinates
use nalgebra::Point2;

use crate::geometry::Vertex;

/// A projected vertex: screen position in pixels plus the retained depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub position: Point2<f32>,
    pub depth: f32,
}

/// Maps the `[-1, 1]` world square onto a `width x height` framebuffer.
///
/// No perspective divide and no clipping: points outside the unit square
/// project outside the buffer and are clamped later by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Project a world-space vertex to screen space
    pub fn project(&self, vertex: &Vertex) -> ScreenPoint {
        let width = self.width as f32;
        let height = self.height as f32;

        // Screen y grows downward
        let screen_x = (vertex.x + 1.0) * width / 2.0;
        let screen_y = (1.0 - vertex.y) * height / 2.0;

        ScreenPoint {
            position: Point2::new(screen_x, screen_y),
            depth: vertex.z,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 800)
    }
}
