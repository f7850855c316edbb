/// Bounding-box triangle rasterizer with a per-pixel depth test
use nalgebra::{Point2, Vector3};

use crate::framebuffer::FrameBuffer;
use crate::projection::ScreenPoint;
use crate::shading::Rgb;

/// Returned by [`barycentric`] for triangles with (near) zero screen area.
/// The negative weight makes every containment test fail.
pub const DEGENERATE: Vector3<f32> = Vector3::new(-1.0, 1.0, 1.0);

/// A projected, flat-coloured triangle ready for rasterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub points: [Point2<f32>; 3],
    pub depths: [f32; 3],
    pub color: Rgb,
}

impl ScreenTriangle {
    pub fn new(vertices: [ScreenPoint; 3], color: Rgb) -> Self {
        Self {
            points: vertices.map(|v| v.position),
            depths: vertices.map(|v| v.depth),
            color,
        }
    }

    /// Depth at barycentric weights `bary`
    pub fn interpolate_depth(&self, bary: &Vector3<f32>) -> f32 {
        bary.x * self.depths[0] + bary.y * self.depths[1] + bary.z * self.depths[2]
    }
}

/// Barycentric weights (w0, w1, w2) of `p` for vertices 0, 1 and 2.
///
/// Triangles whose doubled signed area is below one square pixel yield
/// [`DEGENERATE`].
pub fn barycentric(pts: &[Point2<f32>; 3], p: &Point2<f32>) -> Vector3<f32> {
    let s = Vector3::new(pts[2].x - pts[0].x, pts[1].x - pts[0].x, pts[0].x - p.x).cross(
        &Vector3::new(pts[2].y - pts[0].y, pts[1].y - pts[0].y, pts[0].y - p.y),
    );

    if s.z.abs() < 1.0 {
        return DEGENERATE;
    }
    Vector3::new(1.0 - (s.x + s.y) / s.z, s.y / s.z, s.x / s.z)
}

/// Inside test with an inclusive edge convention. NaN weights count as outside.
#[inline]
fn is_inside(bary: &Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

/// Inclusive pixel bounds `(min_x, min_y, max_x, max_y)` of the triangle,
/// clamped to the framebuffer. `None` when nothing of it lies on screen.
fn clamped_bounds(pts: &[Point2<f32>; 3], width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
    let min_x = pts[0].x.min(pts[1].x).min(pts[2].x).floor() as i64;
    let max_x = pts[0].x.max(pts[1].x).max(pts[2].x).ceil() as i64;
    let min_y = pts[0].y.min(pts[1].y).min(pts[2].y).floor() as i64;
    let max_y = pts[0].y.max(pts[1].y).max(pts[2].y).ceil() as i64;

    // Clip to screen bounds
    let min_x = min_x.max(0);
    let min_y = min_y.max(0);
    let max_x = max_x.min(width as i64 - 1);
    let max_y = max_y.min(height as i64 - 1);

    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x as usize, min_y as usize, max_x as usize, max_y as usize))
}

/// Fill the pixels covered by `triangle`, keeping the larger depth at each
/// pixel. Returns the number of pixels written.
pub fn rasterize(triangle: &ScreenTriangle, frame: &mut FrameBuffer) -> usize {
    let Some((min_x, min_y, max_x, max_y)) =
        clamped_bounds(&triangle.points, frame.width(), frame.height())
    else {
        return 0;
    };

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let sample = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let bary = barycentric(&triangle.points, &sample);
            if !is_inside(&bary) {
                continue;
            }

            let depth = triangle.interpolate_depth(&bary);
            if frame.test_and_set(x, y, depth, triangle.color) {
                written += 1;
            }
        }
    }
    written
}
