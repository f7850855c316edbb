/// Flat per-face shading with a single directional light
use nalgebra::{Unit, Vector3};

use crate::geometry::Vertex;

/// An 8-bit colour triple. Channel order on screen is the display's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level from a light intensity, `clamp(intensity * 255, 0, 255)` per channel
    pub fn from_intensity(intensity: f32) -> Self {
        let level = (intensity * 255.0).clamp(0.0, 255.0) as u8;
        Self::new(level, level, level)
    }

    /// Perceptual brightness in `[0, 1]`
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

/// A directional light, pointing from the surface toward the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    direction: Unit<Vector3<f32>>,
}

impl Light {
    /// Returns `None` for a zero-length or non-finite direction.
    pub fn new(direction: Vector3<f32>) -> Option<Self> {
        if !direction.iter().all(|c| c.is_finite()) {
            return None;
        }
        Unit::try_new(direction, f32::EPSILON).map(|direction| Self { direction })
    }

    pub fn direction(&self) -> &Vector3<f32> {
        &self.direction
    }
}

impl Default for Light {
    /// Toward the viewer
    fn default() -> Self {
        Self {
            direction: Vector3::z_axis(),
        }
    }
}

/// The shading result of one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceShade {
    pub normal: Vector3<f32>,
    pub intensity: f32,
}

impl FaceShade {
    /// Faces are drawn only when lit from the front
    pub fn is_front_facing(&self) -> bool {
        self.intensity > 0.0
    }

    /// A zero-length normal marks a degenerate face
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    pub fn color(&self) -> Rgb {
        Rgb::from_intensity(self.intensity)
    }
}

/// Unit normal of the triangle (v1 - v0) x (v2 - v0), or zero when degenerate
pub fn face_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Vector3<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let normal = edge1.cross(&edge2);

    let length = normal.norm();
    if length == 0.0 {
        return normal;
    }
    normal / length
}

/// Shade a face given its world-space vertices
pub fn shade_face(vertices: &[Vertex; 3], light: &Light) -> FaceShade {
    let normal = face_normal(&vertices[0], &vertices[1], &vertices[2]);
    FaceShade {
        normal,
        intensity: normal.dot(light.direction()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_normal_of_counter_clockwise_triangle() {
        let n = face_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normal_is_unit_length() {
        let n = face_normal(
            &Point3::new(0.1, 0.2, 0.3),
            &Point3::new(2.0, -1.0, 0.5),
            &Point3::new(-0.7, 0.4, 1.9),
        );
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let p = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(face_normal(&p, &p, &p), Vector3::zeros());

        let colinear = face_normal(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 1.0, 1.0),
            &Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(colinear, Vector3::zeros());

        let shade = shade_face(&[p, p, p], &Light::default());
        assert!(shade.is_degenerate());
        assert!(!shade.is_front_facing());
        assert!(!shade.intensity.is_nan());
    }

    #[test]
    fn test_back_face_is_not_front_facing() {
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let shade = shade_face(&tri, &Light::default());
        assert!(shade.intensity < 0.0);
        assert!(!shade.is_front_facing());
    }

    #[test]
    fn test_edge_on_face_is_culled() {
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let shade = shade_face(&tri, &Light::default());
        assert_eq!(shade.intensity, 0.0);
        assert!(!shade.is_front_facing());
    }

    #[test]
    fn test_color_from_intensity() {
        assert_eq!(Rgb::from_intensity(1.0), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_intensity(0.5), Rgb::new(127, 127, 127));
        assert_eq!(Rgb::from_intensity(-0.3), Rgb::BLACK);
        assert_eq!(Rgb::from_intensity(1.7), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_light_rejects_zero_direction() {
        assert!(Light::new(Vector3::zeros()).is_none());
        assert!(Light::new(Vector3::new(f32::NAN, 0.0, 1.0)).is_none());
        let light = Light::new(Vector3::new(0.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(*light.direction(), Vector3::new(0.0, 0.0, 1.0));
    }
}
