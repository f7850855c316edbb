/// Per-frame pipeline: rotate, shade, project and rasterize every face
use tracing::{debug, trace};

use crate::framebuffer::FrameBuffer;
use crate::geometry::{Mesh, Vertex};
use crate::projection::Viewport;
use crate::raster::{rasterize, ScreenTriangle};
use crate::shading::{shade_face, Light};
use crate::transform::Transform;

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Front-facing faces handed to the rasterizer
    pub faces_drawn: usize,
    /// Faces facing away from the light
    pub faces_culled: usize,
    /// Faces with a zero-length normal
    pub faces_degenerate: usize,
    pub pixels_written: usize,
}

/// Flat-shaded mesh renderer.
///
/// Holds no frame state: every call renders into the framebuffer it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    light: Light,
}

impl Renderer {
    pub fn new(light: Light) -> Self {
        Self { light }
    }

    /// Clear `frame` and render `mesh` rotated by `angle` degrees about Y.
    pub fn render_frame(&self, mesh: &Mesh, angle: f32, frame: &mut FrameBuffer) -> FrameStats {
        frame.clear();

        let rotation = Transform::rotation_y(angle);
        let world: Vec<Vertex> = mesh.vertices().iter().map(|v| rotation * v).collect();
        let viewport = Viewport::new(frame.width(), frame.height());

        let mut stats = FrameStats::default();
        for (face_idx, face) in mesh.faces().iter().enumerate() {
            let vertices = face.triangle().map(|i| world[i]);
            self.render_face(face_idx, &vertices, &viewport, frame, &mut stats);
        }

        debug!(
            angle,
            drawn = stats.faces_drawn,
            culled = stats.faces_culled,
            degenerate = stats.faces_degenerate,
            pixels = stats.pixels_written,
            "Rendered frame"
        );
        stats
    }

    fn render_face(
        &self,
        face_idx: usize,
        vertices: &[Vertex; 3],
        viewport: &Viewport,
        frame: &mut FrameBuffer,
        stats: &mut FrameStats,
    ) {
        let shade = shade_face(vertices, &self.light);
        if shade.is_degenerate() {
            trace!(face = face_idx, "Skipping face with zero-length normal");
            stats.faces_degenerate += 1;
            return;
        }
        if !shade.is_front_facing() {
            stats.faces_culled += 1;
            return;
        }

        let screen = vertices.map(|v| viewport.project(&v));
        let triangle = ScreenTriangle::new(screen, shade.color());
        stats.faces_drawn += 1;
        stats.pixels_written += rasterize(&triangle, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use crate::shading::Rgb;
    use nalgebra::{Point3, Vector3};

    fn single_triangle(winding_ccw: bool) -> Mesh {
        let vertices = vec![
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(0.0, 0.5, 0.0),
        ];
        let indices = if winding_ccw { vec![0, 1, 2] } else { vec![0, 2, 1] };
        Mesh::new(vertices, vec![Face::new(indices).unwrap()]).unwrap()
    }

    #[test]
    fn test_front_face_is_drawn() {
        let mut frame = FrameBuffer::new(32, 32, Rgb::BLACK);
        let stats = Renderer::default().render_frame(&single_triangle(true), 0.0, &mut frame);
        assert_eq!(stats.faces_drawn, 1);
        assert!(stats.pixels_written > 0);
        assert_eq!(frame.color(16, 16), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_back_face_writes_nothing() {
        let mut frame = FrameBuffer::new(32, 32, Rgb::BLACK);
        let stats = Renderer::default().render_frame(&single_triangle(false), 0.0, &mut frame);
        assert_eq!(stats.faces_culled, 1);
        assert_eq!(stats.pixels_written, 0);
        assert_eq!(frame.covered_pixels(), 0);
    }

    #[test]
    fn test_half_turn_culls_front_face() {
        let mut frame = FrameBuffer::new(32, 32, Rgb::BLACK);
        let stats = Renderer::default().render_frame(&single_triangle(true), 180.0, &mut frame);
        assert_eq!(stats.faces_drawn, 0);
        assert_eq!(stats.faces_culled, 1);
    }

    #[test]
    fn test_degenerate_face_is_counted() {
        let vertices = vec![Point3::new(0.1, 0.1, 0.0); 3];
        let mesh = Mesh::from_triangles(vertices, &[[0, 1, 2]]).unwrap();
        let mut frame = FrameBuffer::new(16, 16, Rgb::BLACK);
        let stats = Renderer::default().render_frame(&mesh, 0.0, &mut frame);
        assert_eq!(stats.faces_degenerate, 1);
        assert_eq!(frame.covered_pixels(), 0);
    }

    #[test]
    fn test_oblique_light_dims_face() {
        let light = Light::new(Vector3::new(1.0, 0.0, 1.0)).unwrap();
        let mut frame = FrameBuffer::new(32, 32, Rgb::BLACK);
        Renderer::new(light).render_frame(&single_triangle(true), 0.0, &mut frame);
        // cos(45 deg) * 255
        assert_eq!(frame.color(16, 16), Some(Rgb::new(180, 180, 180)));
    }

    #[test]
    fn test_each_frame_starts_clear() {
        let mut frame = FrameBuffer::new(32, 32, Rgb::BLACK);
        let renderer = Renderer::default();
        renderer.render_frame(&single_triangle(true), 0.0, &mut frame);
        assert!(frame.covered_pixels() > 0);
        renderer.render_frame(&Mesh::default(), 0.0, &mut frame);
        assert_eq!(frame.covered_pixels(), 0);
    }
}
